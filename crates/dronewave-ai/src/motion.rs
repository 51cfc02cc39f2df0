//! Movement primitives built on the steering math.
//!
//! Each primitive reads a [`BodyState`] and [`MovementTuning`] and
//! produces an acceleration or torque for the movement integrator,
//! plus a "reached/aligned" flag where that is meaningful. Nothing
//! here writes position or velocity.

use glam::{Quat, Vec3};

use dronewave_core::components::{MovementTuning, WeaponMount};
use dronewave_core::constants::{
    FLY_TO_REACHED_SQ, GRAVITY, VERTICAL_JITTER_FRACTION, WEAPON_AIM_RANGE,
};
use dronewave_core::types::BodyState;

use crate::steering;

/// Accelerate toward `target` with distance easing. Returns the
/// acceleration to command and whether the approach has effectively
/// settled (eased desired velocity magnitude² at or below the reach
/// threshold).
pub fn fly_to(body: &BodyState, tuning: &MovementTuning, target: Vec3, dt: f32) -> (Vec3, bool) {
    let to_target = target - body.position;
    let distance = to_target.length();
    let raw = if distance > f32::EPSILON {
        to_target / distance * tuning.max_speed
    } else {
        Vec3::ZERO
    };
    let desired = steering::ease_toward(
        raw,
        distance,
        tuning.max_speed,
        tuning.ease_inner,
        tuning.ease_slope,
    );
    let accel = steering::clamp_acceleration(desired - body.velocity, dt, tuning.max_accel);
    let accel = steering::gravity_compensate(accel, GRAVITY);
    (accel, desired.length_squared() <= FLY_TO_REACHED_SQ)
}

/// Per-axis hover jitter offset, scaled by the hover radius.
pub fn hover_offset(tuning: &MovementTuning, time: f32) -> Vec3 {
    let n = |axis: usize, freq: f32| {
        steering::hover_noise(time, tuning.hover_noise_offset, freq, axis)
    };
    Vec3::new(
        n(0, tuning.hover_noise_freq.x),
        n(1, tuning.hover_noise_freq.y),
        n(2, tuning.hover_noise_freq.z),
    ) * tuning.hover_radius
}

/// Orbit a point with organic jitter rather than sitting still.
pub fn hover_around(
    body: &BodyState,
    tuning: &MovementTuning,
    target: Vec3,
    time: f32,
    dt: f32,
) -> (Vec3, bool) {
    fly_to(body, tuning, target + hover_offset(tuning, time), dt)
}

/// Circle `center` on the horizontal plane at `radius`, at full speed,
/// with a radial correction computed by projecting one tick ahead and
/// vertical hover noise.
pub fn circle_strafe(
    body: &BodyState,
    tuning: &MovementTuning,
    center: Vec3,
    radius: f32,
    clockwise: bool,
    time: f32,
    dt: f32,
) -> Vec3 {
    let mut offset = body.position - center;
    offset.y = 0.0;
    let dist = offset.length();
    let radial_dir = if dist > f32::EPSILON {
        offset / dist
    } else {
        Vec3::X
    };

    let sign = if clockwise { 1.0 } else { -1.0 };
    let tangential = radial_dir.cross(Vec3::Y) * sign * tuning.max_speed;

    // Project one tick ahead and pull back toward the orbit radius.
    let ahead = offset + tangential * dt;
    let ahead_dist = ahead.length().max(f32::EPSILON);
    let correction =
        (ahead / ahead_dist * (radius - ahead_dist) / dt).clamp_length_max(tuning.max_speed);

    let vertical = Vec3::Y
        * steering::hover_noise(time, tuning.hover_noise_offset, tuning.hover_noise_freq.y, 1)
        * tuning.max_speed
        * VERTICAL_JITTER_FRACTION;

    let desired = tangential + correction + vertical;
    let accel = steering::clamp_acceleration(desired - body.velocity, dt, tuning.max_accel);
    steering::gravity_compensate(accel, GRAVITY)
}

/// Move at full speed along `direction`, with vertical hover noise.
/// Used for reactive movement such as pushing away from a proximity
/// overlap.
pub fn move_along(
    body: &BodyState,
    tuning: &MovementTuning,
    direction: Vec3,
    time: f32,
    dt: f32,
) -> Vec3 {
    let dir = direction.normalize_or_zero();
    let vertical = Vec3::Y
        * steering::hover_noise(time, tuning.hover_noise_offset, tuning.hover_noise_freq.y, 1)
        * tuning.max_speed
        * VERTICAL_JITTER_FRACTION;
    let desired = dir * tuning.max_speed + vertical;
    let accel = steering::clamp_acceleration(desired - body.velocity, dt, tuning.max_accel);
    steering::gravity_compensate(accel, GRAVITY)
}

/// Ease angular velocity to rotate the current forward axis onto
/// `direction`. Returns the torque to command and whether the body is
/// aligned (eased angular velocity exactly zero).
pub fn aim_along(body: &BodyState, tuning: &MovementTuning, direction: Vec3, dt: f32) -> (Vec3, bool) {
    let dir = direction.normalize_or_zero();
    if dir == Vec3::ZERO {
        return (Vec3::ZERO, true);
    }
    let forward = body.forward();
    let angle = forward.angle_between(dir);
    let axis = forward.cross(dir).try_normalize().unwrap_or(Vec3::Y);

    let desired = steering::angular_ease_toward(
        axis,
        angle,
        tuning.max_angular_speed,
        tuning.angular_ease_inner,
        tuning.angular_ease_slope,
    );
    let torque = steering::clamp_acceleration(
        desired - body.angular_velocity,
        dt,
        tuning.max_angular_accel,
    );
    (torque, desired == Vec3::ZERO)
}

/// Aim the forward axis at a world position.
pub fn aim_towards(body: &BodyState, tuning: &MovementTuning, target: Vec3, dt: f32) -> (Vec3, bool) {
    aim_along(body, tuning, target - body.position, dt)
}

/// Aim the forward axis away from a world position.
pub fn aim_away(body: &BodyState, tuning: &MovementTuning, target: Vec3, dt: f32) -> (Vec3, bool) {
    aim_along(body, tuning, body.position - target, dt)
}

/// Ease the current up axis toward `world_up` projected off the
/// forward axis, so upright correction never couples with yaw. The
/// angular acceleration is deliberately unclamped; righting is allowed
/// to be abrupt.
pub fn keep_upright(body: &BodyState, tuning: &MovementTuning, world_up: Vec3, dt: f32) -> Vec3 {
    let forward = body.forward();
    let target_up = (world_up - forward * world_up.dot(forward)).normalize_or_zero();
    if target_up == Vec3::ZERO {
        return Vec3::ZERO;
    }
    let up = body.up();
    let angle = up.angle_between(target_up);
    let axis = up.cross(target_up).try_normalize().unwrap_or(forward);

    let desired = steering::angular_ease_toward(
        axis,
        angle,
        tuning.max_angular_speed,
        tuning.angular_ease_inner,
        tuning.angular_ease_slope,
    );
    let current_along = axis * body.angular_velocity.dot(axis);
    (desired - current_along) / dt
}

/// Spin around the forward axis at full angular speed, reached within
/// one tick. A hit reaction, not precision aiming.
pub fn barrel_roll(body: &BodyState, tuning: &MovementTuning, clockwise: bool, dt: f32) -> Vec3 {
    let sign = if clockwise { 1.0 } else { -1.0 };
    let target = body.forward() * tuning.max_angular_speed * sign;
    (target - body.angular_velocity) / dt
}

/// Point every weapon mount at `target`, clamping the horizontal
/// deviation of each muzzle to the aim cone so a turret never visibly
/// points far off-axis regardless of how the body is steering.
pub fn aim_weapons_at(body: &BodyState, mounts: &mut [WeaponMount], target: Vec3) {
    for mount in mounts {
        let muzzle_pos = body.position + body.rotation * mount.muzzle_offset;
        let mut local = body.rotation.inverse() * (target - muzzle_pos);
        local.y = 0.0;
        if local.length_squared() <= f32::EPSILON {
            mount.muzzle_rotation = body.rotation;
            continue;
        }
        let yaw = local.x.atan2(local.z).clamp(-WEAPON_AIM_RANGE, WEAPON_AIM_RANGE);
        mount.muzzle_rotation = body.rotation * Quat::from_rotation_y(yaw);
    }
}

/// World-space muzzle position of a mount.
pub fn muzzle_position(body: &BodyState, mount: &WeaponMount) -> Vec3 {
    body.position + body.rotation * mount.muzzle_offset
}

/// World-space firing direction of a mount.
pub fn muzzle_direction(mount: &WeaponMount) -> Vec3 {
    mount.muzzle_rotation * Vec3::Z
}
