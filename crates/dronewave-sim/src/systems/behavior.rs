//! Behavior system — runs each drone's state machine for one tick.
//!
//! For every drone: check death, refresh the target (nearest live
//! player, re-resolved every tick so a dead player is never chased),
//! run the state update, and apply any transition with exit/enter
//! ordering. Steering output lands in the drone's [`SteerBuffer`] for
//! the movement integrator; weapon fire is deferred to the combat
//! system via [`FireRequest`]s.

use hecs::{Entity, World};
use log::debug;
use rand_chacha::ChaCha8Rng;

use dronewave_core::components::{
    Actor, DefaultTuning, Drone, Health, MovementTuning, SensorState, SteerBuffer, Weapons,
};
use dronewave_core::enums::StateKind;
use dronewave_core::events::SimEvent;
use dronewave_core::types::{ActorId, BodyState};
use dronewave_core::waves::WaveTable;
use dronewave_ai::fsm::{self, BehaviorState, StateCtx, TargetInfo};
use dronewave_ai::motion;

use crate::geometry::SceneView;
use crate::systems::combat::FireRequest;

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    scene: &SceneView,
    waves: &WaveTable,
    wave: usize,
    time: f32,
    dt: f32,
    targets: &[TargetInfo],
    events: &mut Vec<SimEvent>,
    fire_requests: &mut Vec<FireRequest>,
    despawn_buffer: &mut Vec<(Entity, ActorId)>,
) {
    let spread_scale = waves.spread(wave);

    for (entity, (actor, body, state, tuning, defaults, weapons, sensor, health, steer, _drone)) in
        world.query_mut::<(
            &Actor,
            &BodyState,
            &mut BehaviorState,
            &mut MovementTuning,
            &DefaultTuning,
            &mut Weapons,
            &SensorState,
            &Health,
            &mut SteerBuffer,
            &Drone,
        )>()
    {
        let target = nearest_target(targets, body);
        let caster = scene.excluding(actor.id);
        let mut ctx = StateCtx {
            body,
            tuning,
            tuning_default: &defaults.0,
            weapons: &mut weapons.0,
            target,
            room: &scene.room,
            waves,
            wave,
            rays: &caster,
            rng: &mut *rng,
            sensor: *sensor,
            health: health.current,
            time,
            dt,
        };

        // Death check runs before the state update so a drone killed
        // last tick starts its death sequence this tick.
        if !health.is_alive() && !state.kind().is_dying() {
            let (from, to) = fsm::switch(state, BehaviorState::Die, &mut ctx);
            events.push(SimEvent::StateChanged {
                id: actor.id,
                from,
                to,
            });
        }

        let step = state.update(&mut ctx);
        steer.command = step.command;

        if let Some(index) = step.fire_weapon {
            if let Some(mount) = ctx.weapons.get(index) {
                fire_requests.push(FireRequest {
                    shooter: actor.id,
                    origin: motion::muzzle_position(body, mount),
                    direction: motion::muzzle_direction(mount),
                    spec: mount.spec,
                    spread_scale,
                });
            }
        }

        for drop in &step.loot {
            events.push(SimEvent::LootDropped {
                kind: drop.kind,
                position: drop.position,
            });
        }

        if let Some(next) = step.transition {
            let (from, to) = fsm::switch(state, next, &mut ctx);
            debug!("drone {:?} {from:?} -> {to:?}", actor.id);
            events.push(SimEvent::StateChanged {
                id: actor.id,
                from,
                to,
            });
        }

        if step.despawn {
            if state.kind() == StateKind::DieExplode {
                events.push(SimEvent::Exploded {
                    position: body.position,
                });
            }
            despawn_buffer.push((entity, actor.id));
        }
    }
}

/// Nearest live player, if any.
fn nearest_target(targets: &[TargetInfo], body: &BodyState) -> Option<TargetInfo> {
    targets
        .iter()
        .min_by(|a, b| {
            let da = a.position.distance_squared(body.position);
            let db = b.position.distance_squared(body.position);
            da.total_cmp(&db)
        })
        .copied()
}
