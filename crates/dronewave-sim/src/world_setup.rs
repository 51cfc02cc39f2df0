//! Entity spawn factories.
//!
//! Creates drone and player entities with their component bundles.
//! Drones spawn outside the room at a staging point near the wall
//! closest to their target, already in the arena-entry state.

use glam::Vec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use dronewave_core::components::{
    Actor, DefaultTuning, Drone, Health, MovementTuning, PainConfig, Player, SensorState,
    SteerBuffer, WeaponMount, Weapons,
};
use dronewave_core::constants::{DRONE_MAX_HEALTH, ENTER_ARENA_SPEED_BOOST, PLAYER_MAX_HEALTH};
use dronewave_core::types::{ActorId, BodyState, RayCaster, RoomBounds};
use dronewave_ai::fsm::BehaviorState;
use dronewave_ai::nav;

/// Spawn a drone staged outside the room, targeting `reference` (a live
/// player's position). Returns its actor id.
pub fn spawn_drone(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    rays: &dyn RayCaster,
    room: &RoomBounds,
    reference: Vec3,
    next_actor_id: &mut u32,
) -> ActorId {
    let id = allocate_id(next_actor_id);
    let position = nav::random_spawn_point(rays, room, rng, reference);
    let entrance = nav::closest_room_entrance(rays, room, reference);

    let mut tuning = MovementTuning::default();
    // Desynchronize hover jitter between drones.
    tuning.hover_noise_offset = rng.gen_range(0.0..100.0);
    let defaults = DefaultTuning(tuning);
    // The drone spawns already in the arena-entry state, so the entry
    // speed boost is applied here rather than by an enter hook.
    tuning.max_speed *= ENTER_ARENA_SPEED_BOOST;

    let weapons = Weapons(vec![
        WeaponMount::at(Vec3::new(-0.12, -0.05, 0.18)),
        WeaponMount::at(Vec3::new(0.12, -0.05, 0.18)),
    ]);

    world.spawn((
        Drone,
        Actor { id },
        BodyState::at(position),
        Health::full(DRONE_MAX_HEALTH),
        PainConfig::default(),
        tuning,
        defaults,
        weapons,
        SensorState::default(),
        SteerBuffer::default(),
        BehaviorState::EnterArena { entrance },
    ));
    id
}

/// Spawn a player at a fixed position. Player bodies are driven by the
/// host (head tracking), not by the movement integrator.
pub fn spawn_player(world: &mut World, position: Vec3, next_actor_id: &mut u32) -> ActorId {
    let id = allocate_id(next_actor_id);
    world.spawn((
        Player,
        Actor { id },
        BodyState::at(position),
        Health::full(PLAYER_MAX_HEALTH),
    ));
    id
}

fn allocate_id(next_actor_id: &mut u32) -> ActorId {
    let id = ActorId(*next_actor_id);
    *next_actor_id += 1;
    id
}
