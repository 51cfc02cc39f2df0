//! Weapon fire resolution.
//!
//! Shots are hitscan rays queued by the behavior system (drone volleys)
//! or by the host (player weapons) and resolved here in queue order.
//! Only the nearest hit along a ray takes effect. Knockback and damage
//! share a single strength roll so a hard-hitting shot both hurts and
//! shoves; drone fire against players is heavily attenuated.

use std::collections::HashMap;

use glam::{Quat, Vec3};
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use dronewave_core::components::{
    Actor, DefaultTuning, Health, MovementTuning, PainConfig, SensorState, WeaponSpec, Weapons,
};
use dronewave_core::constants::{FRIENDLY_FIRE_FACTOR, WEAPON_RAY_LENGTH};
use dronewave_core::events::SimEvent;
use dronewave_core::types::{ActorId, BodyState, HitSurface, RayCaster};
use dronewave_core::waves::WaveTable;
use dronewave_ai::fsm::{self, BehaviorState, StateCtx, TargetInfo};

use crate::geometry::SceneView;

/// One queued shot, resolved at the next combat pass.
#[derive(Debug, Clone, Copy)]
pub struct FireRequest {
    pub shooter: ActorId,
    pub origin: Vec3,
    pub direction: Vec3,
    pub spec: WeaponSpec,
    /// Wave-indexed accuracy scale (1.0 for player weapons).
    pub spread_scale: f32,
}

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
    requests: &mut Vec<FireRequest>,
    events: &mut Vec<SimEvent>,
) {
    if requests.is_empty() {
        return;
    }

    let id_map: HashMap<ActorId, Entity> = world
        .query::<&Actor>()
        .iter()
        .map(|(entity, actor)| (actor.id, entity))
        .collect();

    for request in requests.drain(..) {
        events.push(SimEvent::WeaponFired {
            id: request.shooter,
        });

        let direction = perturb(rng, request.direction, &request.spec, request.spread_scale);
        let caster = scene.excluding(request.shooter);
        let Some(hit) = caster.raycast_nearest(request.origin, direction, WEAPON_RAY_LENGTH)
        else {
            continue;
        };

        let (target_id, is_player) = match hit.surface {
            HitSurface::Drone(id) => (id, false),
            HitSurface::Player(id) => (id, true),
            _ => continue, // struck the room shell
        };
        let Some(&entity) = id_map.get(&target_id) else {
            continue;
        };

        // One strength roll drives both knockback and damage.
        let strength = rng.gen::<f32>();
        let spec = &request.spec;
        let mut damage = lerp(spec.damage_min, spec.damage_max, strength);
        let mut knockback = lerp(spec.knockback_min, spec.knockback_max, strength);
        if is_player {
            damage *= FRIENDLY_FIRE_FACTOR;
            knockback *= FRIENDLY_FIRE_FACTOR;
        }

        let (died, alive) = {
            let Ok((body, health)) = world.query_one_mut::<(&mut BodyState, &mut Health)>(entity)
            else {
                continue;
            };
            let was_alive = health.is_alive();
            body.velocity += direction * knockback;
            health.damage(damage);
            (was_alive && !health.is_alive(), health.is_alive())
        };
        events.push(SimEvent::DamageDealt {
            target: target_id,
            amount: damage,
            died,
        });

        if is_player {
            if died {
                events.push(SimEvent::PlayerDied { id: target_id });
            }
            continue;
        }
        if !alive {
            // Reactions require a living drone. Covers both the killing
            // shot and any later shot landing on the corpse before the
            // behavior system starts the death sequence next tick.
            continue;
        }

        react_to_damage(
            world, rng, scene, waves, wave, time, dt, targets, entity, target_id, damage, events,
        );
    }
}

/// Give a surviving drone its chance at a damage reaction.
#[allow(clippy::too_many_arguments)]
fn react_to_damage(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    scene: &SceneView,
    waves: &WaveTable,
    wave: usize,
    time: f32,
    dt: f32,
    targets: &[TargetInfo],
    entity: Entity,
    id: ActorId,
    damage: f32,
    events: &mut Vec<SimEvent>,
) {
    let Ok((body, state, tuning, defaults, weapons, sensor, health, pain)) = world
        .query_one_mut::<(
            &BodyState,
            &mut BehaviorState,
            &mut MovementTuning,
            &DefaultTuning,
            &mut Weapons,
            &SensorState,
            &Health,
            &PainConfig,
        )>(entity)
    else {
        return;
    };

    let target = targets
        .iter()
        .min_by(|a, b| {
            let da = a.position.distance_squared(body.position);
            let db = b.position.distance_squared(body.position);
            da.total_cmp(&db)
        })
        .copied();
    let caster = scene.excluding(id);
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
        rng,
        sensor: *sensor,
        health: health.current,
        time,
        dt,
    };

    if let Some(reaction) = fsm::on_damage(state.kind(), damage, pain.threshold, &mut ctx) {
        let (from, to) = fsm::switch(state, reaction, &mut ctx);
        events.push(SimEvent::StateChanged { id, from, to });
    }
}

/// Deflect a firing direction by a rolled spread angle about a random
/// axis perpendicular to it.
fn perturb(rng: &mut ChaCha8Rng, direction: Vec3, spec: &WeaponSpec, spread_scale: f32) -> Vec3 {
    let dir = direction.normalize_or_zero();
    if dir == Vec3::ZERO {
        return Vec3::Z;
    }
    let angle = rng.gen_range(spec.spread_min..=spec.spread_max) * spread_scale;
    if angle <= f32::EPSILON {
        return dir;
    }
    let roll = rng.gen_range(0.0..std::f32::consts::TAU);
    let axis = Quat::from_axis_angle(dir, roll) * dir.any_orthonormal_vector();
    Quat::from_axis_angle(axis, angle) * dir
}

fn lerp(min: f32, max: f32, t: f32) -> f32 {
    min + (max - min) * t
}
