//! Proximity and collision sensing.
//!
//! Refreshes every drone's [`SensorState`] from the captured scene.
//! Proximity is a sustained signal: the push vector is re-derived every
//! tick the overlap holds, not just on first contact. Collision is hard
//! contact with the room shell and only reported for bodies inside it;
//! drones on the spawn/exit paths fly outside the shell on purpose.

use glam::Vec3;
use hecs::World;

use dronewave_core::components::{Actor, Drone, SensorState};
use dronewave_core::constants::{DRONE_RADIUS, PROXIMITY_RADIUS};
use dronewave_core::types::BodyState;

use crate::geometry::SceneView;

pub fn run(world: &mut World, scene: &SceneView) {
    for (_entity, (actor, body, sensor, _drone)) in
        world.query_mut::<(&Actor, &BodyState, &mut SensorState, &Drone)>()
    {
        let position = body.position;
        let mut push = Vec3::ZERO;
        let mut overlapping = false;

        // Other actors inside the proximity shell.
        for other in &scene.actors {
            if other.id == actor.id {
                continue;
            }
            let offset = position - other.position;
            let distance = offset.length();
            if distance < PROXIMITY_RADIUS + other.radius {
                push += offset.normalize_or_zero();
                overlapping = true;
            }
        }

        let room = &scene.room;
        let inside = room.contains(position);
        let mut collided = false;

        if inside {
            // Room faces: push away when close, collide on contact.
            let gaps = [
                (position.x - room.min.x, Vec3::X),
                (room.max.x - position.x, -Vec3::X),
                (position.y - room.min.y, Vec3::Y),
                (room.max.y - position.y, -Vec3::Y),
                (position.z - room.min.z, Vec3::Z),
                (room.max.z - position.z, -Vec3::Z),
            ];
            for (gap, inward) in gaps {
                if gap < DRONE_RADIUS {
                    collided = true;
                }
                if gap < PROXIMITY_RADIUS {
                    push += inward;
                    overlapping = true;
                }
            }
        }

        sensor.proximity_push = (overlapping && push != Vec3::ZERO)
            .then(|| push.normalize_or_zero());
        sensor.collided = collided;
    }
}
