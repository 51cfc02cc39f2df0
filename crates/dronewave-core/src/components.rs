//! ECS components for the simulation world.
//!
//! Components are plain data structs with no behavior.
//! Game logic lives in systems and the behavior crate.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::ActorId;

/// Marks an entity as an enemy drone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Drone;

/// Marks an entity as a player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Stable actor identity, assigned at spawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
}

/// Health pool. `Heal` deliberately does not clamp to `max` (uncapped
/// healing is preserved behavior, pending product confirmation).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    pub fn damage(&mut self, amount: f32) {
        self.current -= amount;
    }

    /// Restore health. Does not clamp to `max`.
    pub fn heal(&mut self, amount: f32) {
        self.current += amount;
    }
}

/// Damage threshold at which a hit qualifies for the pain reaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PainConfig {
    pub threshold: f32,
}

impl Default for PainConfig {
    fn default() -> Self {
        Self {
            threshold: DRONE_PAIN_THRESHOLD,
        }
    }
}

/// Movement tuning knobs for a drone.
///
/// Two copies are kept side by side on each drone: a mutable "current"
/// set that states may scale temporarily, and a "default" set restored
/// when such a state exits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementTuning {
    /// Maximum linear speed (m/s).
    pub max_speed: f32,
    /// Maximum linear acceleration (m/s²).
    pub max_accel: f32,
    /// Linear easing threshold, in sqrt-distance space.
    pub ease_inner: f32,
    /// Linear easing slope.
    pub ease_slope: f32,
    /// Maximum angular speed (rad/s).
    pub max_angular_speed: f32,
    /// Maximum angular acceleration (rad/s²).
    pub max_angular_accel: f32,
    /// Angular easing threshold, in sqrt-radian space.
    pub angular_ease_inner: f32,
    /// Angular easing slope.
    pub angular_ease_slope: f32,
    /// Hover jitter radius (m).
    pub hover_radius: f32,
    /// Per-drone phase offset into the hover noise field (seconds).
    pub hover_noise_offset: f32,
    /// Hover noise frequency per axis (Hz).
    pub hover_noise_freq: Vec3,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            max_speed: DEFAULT_MAX_SPEED,
            max_accel: DEFAULT_MAX_ACCEL,
            ease_inner: DEFAULT_EASE_INNER,
            ease_slope: DEFAULT_EASE_SLOPE,
            max_angular_speed: DEFAULT_MAX_ANGULAR_SPEED,
            max_angular_accel: DEFAULT_MAX_ANGULAR_ACCEL,
            angular_ease_inner: DEFAULT_ANGULAR_EASE_INNER,
            angular_ease_slope: DEFAULT_ANGULAR_EASE_SLOPE,
            hover_radius: DEFAULT_HOVER_RADIUS,
            hover_noise_offset: 0.0,
            hover_noise_freq: DEFAULT_HOVER_NOISE_FREQ,
        }
    }
}

/// The tuning values a drone restores to when a temporary scale ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultTuning(pub MovementTuning);

/// Weapon firing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponSpec {
    /// Spread angle range (radians).
    pub spread_min: f32,
    pub spread_max: f32,
    /// Damage range per shot.
    pub damage_min: f32,
    pub damage_max: f32,
    /// Knockback impulse range (m/s applied to the struck body).
    pub knockback_min: f32,
    pub knockback_max: f32,
}

impl Default for WeaponSpec {
    fn default() -> Self {
        Self {
            spread_min: 0.01,
            spread_max: 0.06,
            damage_min: 6.0,
            damage_max: 12.0,
            knockback_min: 0.4,
            knockback_max: 1.2,
        }
    }
}

/// A weapon attached to a drone: a muzzle frame plus firing parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeaponMount {
    /// Muzzle position in drone-local space.
    pub muzzle_offset: Vec3,
    /// World-space muzzle rotation, written by weapon aiming.
    pub muzzle_rotation: Quat,
    pub spec: WeaponSpec,
}

impl WeaponMount {
    pub fn at(muzzle_offset: Vec3) -> Self {
        Self {
            muzzle_offset,
            muzzle_rotation: Quat::IDENTITY,
            spec: WeaponSpec::default(),
        }
    }
}

/// A drone's weapon mounts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Weapons(pub Vec<WeaponMount>);

/// Sensor readings for one drone, refreshed each tick by the sensor
/// system. Proximity is a sustained "stay" signal, re-delivered every
/// tick the overlap holds; it is distinct from hard collision.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SensorState {
    /// Push direction away from overlapping obstacles, if any.
    pub proximity_push: Option<Vec3>,
    /// Hard contact with static geometry this tick.
    pub collided: bool,
}

/// Steering command buffer, written by the behavior system and consumed
/// by the movement integrator in the same tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SteerBuffer {
    pub command: crate::types::SteerCommand,
}
