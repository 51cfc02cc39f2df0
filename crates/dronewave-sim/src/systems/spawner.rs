//! Wave coordinator — paces drone spawns and advances waves.
//!
//! Two invariants hold at every tick: live drones never exceed the
//! current wave's concurrency cap, and the wave index only advances
//! once the full spawn quota has been spawned AND every spawned drone
//! has left the world (killed or exited).

use glam::Vec3;
use hecs::World;
use log::{debug, info};
use rand_chacha::ChaCha8Rng;

use dronewave_core::enums::GameMode;
use dronewave_core::events::SimEvent;
use dronewave_core::types::{ActorId, RoomBounds};
use dronewave_core::waves::WaveTable;

use crate::geometry::SceneView;
use crate::world_setup;

/// Mutable spawn-pacing state, owned by the engine across ticks.
#[derive(Debug, Clone, Default)]
pub struct WaveState {
    /// Current wave index into the table.
    pub wave: usize,
    /// Drones spawned so far during this wave.
    pub spawned: u32,
    /// Drones currently alive (spawned and not yet despawned).
    pub live: u32,
    /// Seconds until the next spawn is permitted.
    pub cooldown: f32,
    /// Waves fully cleared so far.
    pub cleared: u32,
    /// All waves are finished; no further spawns will happen.
    pub complete: bool,
}

impl WaveState {
    /// Initial state for a fresh match, positioned on the first wave
    /// the mode actually plays.
    pub fn start(waves: &WaveTable, mode: GameMode) -> Self {
        let wave = first_wave(waves, mode);
        Self {
            wave: wave.unwrap_or(0),
            complete: wave.is_none(),
            ..Self::default()
        }
    }
}

/// First wave index played by `mode`, or `None` when every wave is
/// skipped.
fn first_wave(waves: &WaveTable, mode: GameMode) -> Option<usize> {
    let mut wave = 0;
    if mode == GameMode::Short {
        while wave < waves.len() && waves.skipped_in_short(wave) {
            wave += 1;
        }
    }
    (wave < waves.len()).then_some(wave)
}

/// Wave played after `current`, honoring short-mode skips and endless
/// looping. `None` means the match is over.
pub fn next_wave(waves: &WaveTable, mode: GameMode, current: usize) -> Option<usize> {
    let mut wave = current + 1;
    if mode == GameMode::Short {
        while wave < waves.len() && waves.skipped_in_short(wave) {
            wave += 1;
        }
    }
    if wave < waves.len() {
        Some(wave)
    } else if mode == GameMode::Endless {
        Some(waves.last_wave())
    } else {
        None
    }
}

/// Pace spawns for the current wave and advance it when it drains.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    scene: &SceneView,
    waves: &WaveTable,
    mode: GameMode,
    state: &mut WaveState,
    room: &RoomBounds,
    live_players: &[(ActorId, Vec3)],
    next_actor_id: &mut u32,
    dt: f32,
    events: &mut Vec<SimEvent>,
) {
    if state.complete || live_players.is_empty() {
        return;
    }

    // Advance when the quota is spawned and the arena has drained.
    if state.spawned >= waves.drones(state.wave) && state.live == 0 {
        state.cleared += 1;
        match next_wave(waves, mode, state.wave) {
            Some(wave) => {
                info!("wave {} cleared, starting wave {wave}", state.wave);
                state.wave = wave;
                state.spawned = 0;
                state.cooldown = 0.0;
                events.push(SimEvent::WaveStarted { wave });
            }
            None => {
                info!("final wave {} cleared", state.wave);
                state.complete = true;
                return;
            }
        }
    }

    state.cooldown -= dt;
    if state.cooldown > 0.0 {
        return;
    }
    if state.spawned >= waves.drones(state.wave) || state.live >= waves.max_alive(state.wave) {
        return;
    }

    // Rotate spawns across live players so pressure is shared.
    let reference = live_players[state.spawned as usize % live_players.len()].1;
    let caster = scene.caster();
    let id = world_setup::spawn_drone(world, rng, &caster, room, reference, next_actor_id);
    debug!("spawned drone {id:?} for wave {}", state.wave);

    state.spawned += 1;
    state.live += 1;
    events.push(SimEvent::DroneSpawned { id });

    // More players means faster pacing.
    state.cooldown = waves.cadence(state.wave) / live_players.len() as f32;
}
