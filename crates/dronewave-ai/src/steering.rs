//! Stateless steering math.
//!
//! Every movement behavior (fly-to, hover, circle-strafe, aim,
//! keep-upright, barrel-roll) is a composition of these primitives,
//! which keeps a dozen distinct behaviors consistent and tunable
//! through one small parameter set.

use glam::Vec3;

use dronewave_core::constants::NOISE_WRAP_SECS;

/// Scale a raw target velocity by a smooth function of remaining
/// distance, producing slow-in/slow-out approaches. The scale is
/// `clamp01(ease_slope * (sqrt(distance) - ease_inner))`; the result
/// never exceeds `max_speed`.
pub fn ease_toward(
    raw_target_velocity: Vec3,
    distance: f32,
    max_speed: f32,
    ease_inner: f32,
    ease_slope: f32,
) -> Vec3 {
    let scale = (ease_slope * (distance.max(0.0).sqrt() - ease_inner)).clamp(0.0, 1.0);
    (raw_target_velocity * scale).clamp_length_max(max_speed)
}

/// Acceleration required to close `delta_velocity` within one tick,
/// rescaled to exactly `max_accel` when it would exceed it. Direction
/// is always preserved.
pub fn clamp_acceleration(delta_velocity: Vec3, dt: f32, max_accel: f32) -> Vec3 {
    let accel = delta_velocity / dt;
    accel.clamp_length_max(max_accel)
}

/// Convert "acceleration needed to achieve a target velocity, ignoring
/// gravity" into the acceleration to command so the net force also
/// cancels ambient gravity.
pub fn gravity_compensate(accel: Vec3, gravity: Vec3) -> Vec3 {
    accel - gravity
}

/// Deterministic hover jitter in [-1, 1], one channel per axis.
///
/// Sampled from a 2D value-noise field at `(time * frequency,
/// axis * 10 + offset)`. Time wraps every [`NOISE_WRAP_SECS`] to keep
/// the lattice coordinates small over long sessions.
pub fn hover_noise(time_secs: f32, offset_secs: f32, frequency: f32, axis: usize) -> f32 {
    let t = (time_secs % NOISE_WRAP_SECS) * frequency;
    let channel = axis as f32 * 10.0 + offset_secs;
    value_noise_2d(t, channel)
}

/// Angular analogue of [`ease_toward`]: eased angular velocity to
/// rotate through `angle` radians about `axis`.
pub fn angular_ease_toward(
    axis: Vec3,
    angle: f32,
    max_angular_speed: f32,
    ease_inner: f32,
    ease_slope: f32,
) -> Vec3 {
    let scale = (ease_slope * (angle.max(0.0).sqrt() - ease_inner)).clamp(0.0, 1.0);
    (axis * max_angular_speed * scale).clamp_length_max(max_angular_speed)
}

/// Bilinear value noise over an integer lattice of hashed values.
fn value_noise_2d(x: f32, y: f32) -> f32 {
    let x0 = x.floor();
    let y0 = y.floor();
    let ix = x0 as i32;
    let iy = y0 as i32;
    let fx = smoothstep(x - x0);
    let fy = smoothstep(y - y0);

    let v00 = lattice_hash(ix, iy);
    let v10 = lattice_hash(ix + 1, iy);
    let v01 = lattice_hash(ix, iy + 1);
    let v11 = lattice_hash(ix + 1, iy + 1);

    let top = v00 + (v10 - v00) * fx;
    let bottom = v01 + (v11 - v01) * fx;
    top + (bottom - top) * fy
}

fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Integer hash to a value in [-1, 1].
fn lattice_hash(ix: i32, iy: i32) -> f32 {
    let mut h = (ix as u32)
        .wrapping_mul(0x9e37_79b1)
        .wrapping_add((iy as u32).wrapping_mul(0x85eb_ca77));
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    (h as f32 / u32::MAX as f32) * 2.0 - 1.0
}
