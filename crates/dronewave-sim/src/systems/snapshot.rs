//! Snapshot builder — samples the world into a serializable view.

use hecs::World;

use dronewave_core::components::{Actor, Drone, Health, Player};
use dronewave_core::enums::{GameMode, GamePhase};
use dronewave_core::events::SimEvent;
use dronewave_core::state::{DroneView, PlayerView, SimSnapshot};
use dronewave_core::types::{BodyState, SimTime};
use dronewave_ai::fsm::BehaviorState;

pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    mode: GameMode,
    wave: usize,
    events: Vec<SimEvent>,
) -> SimSnapshot {
    let mut drones = Vec::new();
    for (_entity, (actor, body, state, health, _drone)) in world
        .query::<(&Actor, &BodyState, &BehaviorState, &Health, &Drone)>()
        .iter()
    {
        drones.push(DroneView {
            id: actor.id,
            position: body.position,
            velocity: body.velocity,
            rotation: body.rotation,
            state: state.kind(),
            health: health.current,
        });
    }
    // Stable ordering regardless of archetype iteration order.
    drones.sort_by_key(|d| d.id);

    let mut players = Vec::new();
    for (_entity, (actor, body, health, _player)) in world
        .query::<(&Actor, &BodyState, &Health, &Player)>()
        .iter()
    {
        players.push(PlayerView {
            id: actor.id,
            position: body.position,
            health: health.current,
        });
    }
    players.sort_by_key(|p| p.id);

    SimSnapshot {
        time: *time,
        phase,
        mode,
        wave,
        drones,
        players,
        events,
    }
}
