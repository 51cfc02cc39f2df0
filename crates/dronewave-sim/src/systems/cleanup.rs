//! Cleanup system: despawns drones marked for removal this tick.

use hecs::{Entity, World};

use dronewave_core::events::SimEvent;
use dronewave_core::types::ActorId;

use crate::systems::spawner::WaveState;

/// Despawn buffered entities and keep the wave coordinator's live count
/// in step. Every removal path (explosion, settled wreck, graceful
/// exit) goes through this buffer.
pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<(Entity, ActorId)>,
    wave_state: &mut WaveState,
    events: &mut Vec<SimEvent>,
) {
    for (entity, id) in despawn_buffer.drain(..) {
        if world.despawn(entity).is_ok() {
            wave_state.live = wave_state.live.saturating_sub(1);
            events.push(SimEvent::DroneDespawned { id });
        }
    }
}
