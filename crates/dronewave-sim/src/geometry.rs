//! Scene geometry and raycasting.
//!
//! The playable room is an axis-aligned box; rays test its six faces
//! plus the bounding spheres of every actor. A [`SceneView`] is captured
//! once per tick before the behavior system runs, so every drone
//! queries the same consistent world state regardless of update order.

use glam::Vec3;
use hecs::World;

use dronewave_core::components::{Actor, Player};
use dronewave_core::constants::{DRONE_RADIUS, PLAYER_RADIUS};
use dronewave_core::types::{ActorId, BodyState, HitSurface, RayCaster, RayHit, RoomBounds};

/// One actor's collision sphere.
#[derive(Debug, Clone, Copy)]
pub struct ActorShape {
    pub id: ActorId,
    pub position: Vec3,
    pub radius: f32,
    pub is_player: bool,
}

/// Immutable copy of everything rays can strike this tick.
#[derive(Debug, Clone)]
pub struct SceneView {
    pub room: RoomBounds,
    pub actors: Vec<ActorShape>,
}

impl SceneView {
    /// Sample actor spheres from the world.
    pub fn capture(world: &World, room: RoomBounds) -> Self {
        let mut actors = Vec::new();
        for (_entity, (actor, body, player)) in
            world.query::<(&Actor, &BodyState, Option<&Player>)>().iter()
        {
            let is_player = player.is_some();
            actors.push(ActorShape {
                id: actor.id,
                position: body.position,
                radius: if is_player { PLAYER_RADIUS } else { DRONE_RADIUS },
                is_player,
            });
        }
        Self { room, actors }
    }

    /// A caster over this scene that skips the given actor, so a body
    /// never hits itself.
    pub fn excluding(&self, id: ActorId) -> SceneRaycaster<'_> {
        SceneRaycaster {
            scene: self,
            exclude: Some(id),
        }
    }

    pub fn caster(&self) -> SceneRaycaster<'_> {
        SceneRaycaster {
            scene: self,
            exclude: None,
        }
    }
}

/// [`RayCaster`] over a captured scene.
pub struct SceneRaycaster<'a> {
    scene: &'a SceneView,
    exclude: Option<ActorId>,
}

impl RayCaster for SceneRaycaster<'_> {
    fn raycast_all(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Vec<RayHit> {
        let mut hits = Vec::new();
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return hits;
        }

        room_faces(&self.scene.room, origin, dir, max_distance, &mut hits);

        for actor in &self.scene.actors {
            if Some(actor.id) == self.exclude {
                continue;
            }
            if let Some(distance) =
                ray_sphere(origin, dir, actor.position, actor.radius, max_distance)
            {
                let point = origin + dir * distance;
                let surface = if actor.is_player {
                    HitSurface::Player(actor.id)
                } else {
                    HitSurface::Drone(actor.id)
                };
                hits.push(RayHit {
                    point,
                    normal: (point - actor.position).normalize_or_zero(),
                    distance,
                    surface,
                });
            }
        }
        hits
    }
}

/// Intersect a ray with the six faces of the room box. Faces are
/// one-sided planes bounded by the box extents; both the inside and the
/// outside of a face count as a hit (drones fly in from outside).
fn room_faces(room: &RoomBounds, origin: Vec3, dir: Vec3, max_distance: f32, hits: &mut Vec<RayHit>) {
    // (axis, plane position, inward normal, surface)
    let faces = [
        (0, room.min.x, Vec3::X, HitSurface::Wall),
        (0, room.max.x, -Vec3::X, HitSurface::Wall),
        (1, room.min.y, Vec3::Y, HitSurface::Floor),
        (1, room.max.y, -Vec3::Y, HitSurface::Ceiling),
        (2, room.min.z, Vec3::Z, HitSurface::Wall),
        (2, room.max.z, -Vec3::Z, HitSurface::Wall),
    ];

    for (axis, plane, normal, surface) in faces {
        let d = dir[axis];
        if d.abs() < f32::EPSILON {
            continue;
        }
        let t = (plane - origin[axis]) / d;
        if t <= 0.0 || t > max_distance {
            continue;
        }
        let point = origin + dir * t;
        if in_face_rect(room, point, axis) {
            hits.push(RayHit {
                point,
                normal,
                distance: t,
                surface,
            });
        }
    }
}

/// Whether a point on a face plane lies within the face rectangle.
fn in_face_rect(room: &RoomBounds, point: Vec3, axis: usize) -> bool {
    for other in 0..3 {
        if other == axis {
            continue;
        }
        if point[other] < room.min[other] || point[other] > room.max[other] {
            return false;
        }
    }
    true
}

/// Nearest positive ray/sphere intersection distance within range.
fn ray_sphere(
    origin: Vec3,
    dir: Vec3,
    center: Vec3,
    radius: f32,
    max_distance: f32,
) -> Option<f32> {
    let to_center = center - origin;
    let proj = to_center.dot(dir);
    let closest_sq = to_center.length_squared() - proj * proj;
    let radius_sq = radius * radius;
    if closest_sq > radius_sq {
        return None;
    }
    let half_chord = (radius_sq - closest_sq).sqrt();
    let t = if proj - half_chord > 0.0 {
        proj - half_chord
    } else {
        proj + half_chord
    };
    (t > 0.0 && t <= max_distance).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> RoomBounds {
        RoomBounds::new(Vec3::new(-4.0, 0.0, -4.0), Vec3::new(4.0, 3.0, 4.0))
    }

    fn empty_scene() -> SceneView {
        SceneView {
            room: room(),
            actors: Vec::new(),
        }
    }

    #[test]
    fn test_ray_hits_nearest_wall() {
        let scene = empty_scene();
        let hit = scene
            .caster()
            .raycast_nearest(Vec3::new(0.0, 1.5, 0.0), Vec3::Z, 50.0)
            .expect("should hit the +z wall");
        assert_eq!(hit.surface, HitSurface::Wall);
        assert!((hit.distance - 4.0).abs() < 1e-5);
        assert_eq!(hit.normal, -Vec3::Z);
    }

    #[test]
    fn test_ray_down_hits_floor() {
        let scene = empty_scene();
        let hit = scene
            .caster()
            .raycast_nearest(Vec3::new(1.0, 2.0, 1.0), -Vec3::Y, 50.0)
            .expect("should hit the floor");
        assert_eq!(hit.surface, HitSurface::Floor);
        assert!((hit.distance - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_misses_outside_face_rect() {
        let scene = empty_scene();
        // Origin above the ceiling, ray parallel to the floor: passes
        // over the box entirely.
        let hit = scene
            .caster()
            .raycast_nearest(Vec3::new(0.0, 10.0, -20.0), Vec3::Z, 50.0);
        assert!(hit.is_none());
    }

    #[test]
    fn test_sphere_hit_shadows_wall() {
        let mut scene = empty_scene();
        let id = ActorId(7);
        scene.actors.push(ActorShape {
            id,
            position: Vec3::new(0.0, 1.5, 2.0),
            radius: 0.25,
            is_player: false,
        });
        let hit = scene
            .caster()
            .raycast_nearest(Vec3::new(0.0, 1.5, 0.0), Vec3::Z, 50.0)
            .unwrap();
        assert_eq!(hit.surface, HitSurface::Drone(id));
        assert!((hit.distance - 1.75).abs() < 1e-5);
    }

    #[test]
    fn test_exclusion_skips_self() {
        let mut scene = empty_scene();
        let id = ActorId(7);
        scene.actors.push(ActorShape {
            id,
            position: Vec3::new(0.0, 1.5, 0.0),
            radius: 0.25,
            is_player: false,
        });
        // A ray from inside its own sphere must not hit itself.
        let hit = scene
            .excluding(id)
            .raycast_nearest(Vec3::new(0.0, 1.5, 0.0), Vec3::Z, 50.0)
            .unwrap();
        assert!(hit.surface.is_static());
    }
}
