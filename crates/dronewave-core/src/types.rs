//! Fundamental geometric and simulation types.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f32,
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f32 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Opaque stable identity for an actor (drone or player).
///
/// The behavior core never sees ECS entity handles; all cross-actor
/// references (targeting, ray hits, damage) go through this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// Read-only physical state of a rigid body, as sampled at the start of
/// a behavior update. The behavior core reads this and emits a
/// [`SteerCommand`]; it never writes position or rotation directly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BodyState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Quat,
    /// Angular velocity in radians per second (axis-angle rate vector).
    pub angular_velocity: Vec3,
}

impl BodyState {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            angular_velocity: Vec3::ZERO,
        }
    }

    /// World-space forward axis (+Z in local space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// World-space up axis (+Y in local space).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

/// Per-tick command consumed by the movement integrator.
///
/// `accel` is a linear acceleration (m/s²), `torque` an angular
/// acceleration (rad/s²). Commands are the only channel through which
/// behaviors influence a body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SteerCommand {
    pub accel: Vec3,
    pub torque: Vec3,
}

impl SteerCommand {
    pub fn merge(self, other: SteerCommand) -> SteerCommand {
        SteerCommand {
            accel: self.accel + other.accel,
            torque: self.torque + other.torque,
        }
    }
}

/// Axis-aligned extents of the playable room, computed once from wall
/// geometry at setup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl RoomBounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Radius of the sphere bounding the room, measured from its center.
    pub fn bounding_radius(&self) -> f32 {
        (self.max - self.center()).length()
    }

    /// Fixed fallback staging point above the room center, used when a
    /// wall raycast comes back empty.
    pub fn above_center(&self) -> Vec3 {
        let mut p = self.center();
        p.y = self.max.y + crate::constants::ROOM_OVERHEAD_CLEARANCE;
        p
    }

    /// Bounds shrunk by the wall inset, the region random waypoints are
    /// sampled from.
    pub fn inset(&self) -> RoomBounds {
        let inset = Vec3::splat(crate::constants::ROOM_WALL_INSET);
        RoomBounds {
            min: self.min + inset,
            max: self.max - inset,
        }
    }

    /// Clamp a point into the inset region.
    pub fn clamp_inside(&self, point: Vec3) -> Vec3 {
        let inner = self.inset();
        point.clamp(inner.min, inner.max)
    }
}

/// What a ray struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitSurface {
    Wall,
    Floor,
    Ceiling,
    Drone(ActorId),
    Player(ActorId),
}

impl HitSurface {
    /// Static room geometry (not an actor).
    pub fn is_static(&self) -> bool {
        matches!(self, HitSurface::Wall | HitSurface::Floor | HitSurface::Ceiling)
    }
}

/// A single raycast hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
    pub surface: HitSurface,
}

/// World query interface the behavior core consumes. Implemented by the
/// simulation over room planes and actor bounding spheres; tests supply
/// stubs.
pub trait RayCaster {
    /// All hits along the ray up to `max_distance`, in no particular order.
    fn raycast_all(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Vec<RayHit>;

    /// The nearest hit, if any.
    fn raycast_nearest(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<RayHit> {
        self.raycast_all(origin, direction, max_distance)
            .into_iter()
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}
