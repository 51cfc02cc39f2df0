//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Discriminant of a drone's behavior state, used for snapshots,
/// transition events, and reaction gating. The payload-carrying state
/// itself lives in the behavior crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateKind {
    /// Flying in from a staging point outside the room.
    EnterArena,
    /// Seeking a standoff position around the target player.
    Distribute,
    /// Loitering and deciding what to do next.
    Plan,
    /// Firing weapon volleys at the target.
    Attack,
    /// Hit reaction: stunned spin.
    Pain,
    /// Hit reaction: facing away from the target.
    HideWeakpoint,
    /// Hit reaction: lateral/vertical evasion burst.
    Dodge,
    /// Traveling to a random point inside the room.
    Relocate,
    /// Leaving the arena for despawn (no live target remains).
    ExitArena,
    /// Just died; rolls a death sequence immediately.
    Die,
    /// Derelict, falling under gravity.
    DieFall,
    /// Derelict, spinning and drifting down.
    DieMalfunction,
    /// Detonates and despawns immediately.
    DieExplode,
}

impl StateKind {
    /// In a death sequence; the per-tick death check must not re-enter Die.
    pub fn is_dying(&self) -> bool {
        matches!(
            self,
            StateKind::Die | StateKind::DieFall | StateKind::DieMalfunction | StateKind::DieExplode
        )
    }

    /// Derelict states fly without gravity compensation; the integrator
    /// lets gravity act on them.
    pub fn is_derelict(&self) -> bool {
        matches!(self, StateKind::DieFall | StateKind::DieMalfunction)
    }

    /// States during which damage reactions (pain/dodge/hide) are ignored.
    pub fn ignores_damage_reactions(&self) -> bool {
        self.is_dying() || matches!(self, StateKind::EnterArena | StateKind::ExitArena)
    }
}

/// Movement pattern chosen while planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovePattern {
    Forward,
    Backward,
    Strafe,
    Vertical,
    Circle,
}

/// How a drone dies, rolled once on death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathKind {
    Fall,
    Malfunction,
    Explode,
}

/// Match length variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Normal,
    /// Skips flagged waves for a shorter match.
    Short,
    /// Loops the final wave forever.
    Endless,
}

/// Loot dropped on death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LootKind {
    Small,
    Large,
}

/// Top-level match phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Idle,
    Active,
    GameOver,
}
