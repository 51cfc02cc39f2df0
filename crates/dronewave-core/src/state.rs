//! Snapshot types — the complete visible state produced each tick.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::{GameMode, GamePhase, StateKind};
use crate::events::SimEvent;
use crate::types::{ActorId, SimTime};

/// Complete simulation state for one tick, for rendering and replay.
/// Events are drained into the snapshot of the tick they occurred in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub mode: GameMode,
    /// Current wave index.
    pub wave: usize,
    pub drones: Vec<DroneView>,
    pub players: Vec<PlayerView>,
    pub events: Vec<SimEvent>,
}

/// One drone's visible state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroneView {
    pub id: ActorId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Quat,
    pub state: StateKind,
    pub health: f32,
}

/// One player's visible state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: ActorId,
    pub position: Vec3,
    pub health: f32,
}
