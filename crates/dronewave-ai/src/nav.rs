//! Room-relative navigation queries.
//!
//! Entrance and spawn points are found by casting a horizontal ray
//! toward the walls and offsetting slightly inward (entrances) or
//! outward (spawn points) from the nearest wall hit. When no wall is
//! hit the queries fall back to a fixed point above the room center.

use glam::Vec3;
use rand::Rng;

use dronewave_core::constants::{
    ENTRANCE_INSET, ROOM_QUERY_RAY_LENGTH, SPAWN_OUTSET,
};
use dronewave_core::types::{RayCaster, RoomBounds};

/// Directions probed when searching for the closest wall.
const PROBE_DIRECTIONS: usize = 8;

fn horizontal_dir(angle: f32) -> Vec3 {
    Vec3::new(angle.sin(), 0.0, angle.cos())
}

fn nearest_wall_hit(
    rays: &dyn RayCaster,
    origin: Vec3,
    direction: Vec3,
) -> Option<dronewave_core::types::RayHit> {
    rays.raycast_all(origin, direction, ROOM_QUERY_RAY_LENGTH)
        .into_iter()
        .filter(|hit| hit.surface.is_static())
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

fn wall_point(
    rays: &dyn RayCaster,
    room: &RoomBounds,
    reference: Vec3,
    direction: Vec3,
    offset: f32,
) -> Vec3 {
    match nearest_wall_hit(rays, reference, direction) {
        Some(hit) => hit.point + direction * offset,
        None => room.above_center(),
    }
}

/// Entrance point on the wall closest to `reference`, just inside it.
pub fn closest_room_entrance(rays: &dyn RayCaster, room: &RoomBounds, reference: Vec3) -> Vec3 {
    let mut best: Option<(f32, Vec3)> = None;
    for i in 0..PROBE_DIRECTIONS {
        let angle = std::f32::consts::TAU * i as f32 / PROBE_DIRECTIONS as f32;
        let dir = horizontal_dir(angle);
        if let Some(hit) = nearest_wall_hit(rays, reference, dir) {
            let point = hit.point - dir * ENTRANCE_INSET;
            if best.map_or(true, |(d, _)| hit.distance < d) {
                best = Some((hit.distance, point));
            }
        }
    }
    best.map_or_else(|| room.above_center(), |(_, p)| p)
}

/// Entrance point in a random horizontal direction from `reference`.
pub fn random_room_entrance<R: Rng>(
    rays: &dyn RayCaster,
    room: &RoomBounds,
    rng: &mut R,
    reference: Vec3,
) -> Vec3 {
    let dir = horizontal_dir(rng.gen_range(0.0..std::f32::consts::TAU));
    wall_point(rays, room, reference, dir, -ENTRANCE_INSET)
}

/// Spawn (staging) point just outside the wall closest to `reference`,
/// lifted above the ceiling so the flight path arcs over the boundary.
pub fn closest_spawn_point(rays: &dyn RayCaster, room: &RoomBounds, reference: Vec3) -> Vec3 {
    let mut best: Option<(f32, Vec3)> = None;
    for i in 0..PROBE_DIRECTIONS {
        let angle = std::f32::consts::TAU * i as f32 / PROBE_DIRECTIONS as f32;
        let dir = horizontal_dir(angle);
        if let Some(hit) = nearest_wall_hit(rays, reference, dir) {
            let mut point = hit.point + dir * SPAWN_OUTSET;
            point.y = room.above_center().y;
            if best.map_or(true, |(d, _)| hit.distance < d) {
                best = Some((hit.distance, point));
            }
        }
    }
    best.map_or_else(|| room.above_center(), |(_, p)| p)
}

/// Spawn point in a random horizontal direction from `reference`.
pub fn random_spawn_point<R: Rng>(
    rays: &dyn RayCaster,
    room: &RoomBounds,
    rng: &mut R,
    reference: Vec3,
) -> Vec3 {
    let dir = horizontal_dir(rng.gen_range(0.0..std::f32::consts::TAU));
    let mut point = wall_point(rays, room, reference, dir, SPAWN_OUTSET);
    point.y = room.above_center().y;
    point
}

/// Uniformly random waypoint inside the room, inset from the walls.
pub fn random_point_inside<R: Rng>(room: &RoomBounds, rng: &mut R) -> Vec3 {
    let inner = room.inset();
    Vec3::new(
        rng.gen_range(inner.min.x..=inner.max.x),
        rng.gen_range(inner.min.y..=inner.max.y),
        rng.gen_range(inner.min.z..=inner.max.z),
    )
}
