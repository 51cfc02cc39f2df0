//! Events emitted by the simulation for consumers (VFX, audio, scoring).

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{LootKind, StateKind};
use crate::types::ActorId;

/// Simulation events collected during a tick and drained into the
/// snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A drone entered the world.
    DroneSpawned { id: ActorId },
    /// A drone left the world (any path: explosion, settled wreck, exit).
    DroneDespawned { id: ActorId },
    /// A drone switched behavior states.
    StateChanged {
        id: ActorId,
        from: StateKind,
        to: StateKind,
    },
    /// Damage was applied to an actor. `died` is true exactly once, on
    /// the application that first drops health to zero or below.
    DamageDealt {
        target: ActorId,
        amount: f32,
        died: bool,
    },
    /// A weapon fired.
    WeaponFired { id: ActorId },
    /// Loot dropped at a position.
    LootDropped { kind: LootKind, position: Vec3 },
    /// A drone detonated.
    Exploded { position: Vec3 },
    /// A player ran out of health.
    PlayerDied { id: ActorId },
    /// A new wave began.
    WaveStarted { wave: usize },
    /// The match ended.
    GameOver { waves_cleared: u32 },
}
