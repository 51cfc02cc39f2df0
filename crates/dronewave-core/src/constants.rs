//! Simulation constants and tuning parameters.

use glam::Vec3;

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 50;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

/// Ambient gravity (m/s²).
pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

/// World floor height; derelict drones below this are removed.
pub const WORLD_FLOOR_Y: f32 = -5.0;

// --- Room geometry ---

/// Minimum distance from a wall for sampled waypoints.
pub const ROOM_WALL_INSET: f32 = 0.4;

/// Height above the room ceiling for fallback/exit staging points.
pub const ROOM_OVERHEAD_CLEARANCE: f32 = 1.5;

/// Entrance points sit this far inside the wall a ray struck.
pub const ENTRANCE_INSET: f32 = 0.5;

/// Spawn points sit this far outside the wall a ray struck.
pub const SPAWN_OUTSET: f32 = 1.2;

/// Maximum wall-search ray length for entrance/spawn queries.
pub const ROOM_QUERY_RAY_LENGTH: f32 = 50.0;

// --- Drone body ---

/// Drone bounding-sphere radius (m).
pub const DRONE_RADIUS: f32 = 0.25;

/// Player bounding-sphere radius (m).
pub const PLAYER_RADIUS: f32 = 0.4;

/// Proximity sensor radius around a drone (m).
pub const PROXIMITY_RADIUS: f32 = 0.9;

// --- Default movement tuning ---

pub const DEFAULT_MAX_SPEED: f32 = 4.0;
pub const DEFAULT_MAX_ACCEL: f32 = 24.0;
/// Linear easing threshold, in sqrt-distance space.
pub const DEFAULT_EASE_INNER: f32 = 0.35;
pub const DEFAULT_EASE_SLOPE: f32 = 0.9;
/// Maximum angular speed (rad/s).
pub const DEFAULT_MAX_ANGULAR_SPEED: f32 = std::f32::consts::PI;
/// Maximum angular acceleration (rad/s²).
pub const DEFAULT_MAX_ANGULAR_ACCEL: f32 = 4.0 * std::f32::consts::PI;
/// Angular easing threshold, in sqrt-radian space.
pub const DEFAULT_ANGULAR_EASE_INNER: f32 = 0.08;
pub const DEFAULT_ANGULAR_EASE_SLOPE: f32 = 1.6;
pub const DEFAULT_HOVER_RADIUS: f32 = 0.35;
pub const DEFAULT_HOVER_NOISE_FREQ: Vec3 = Vec3::new(0.35, 0.5, 0.35);

// --- Steering ---

/// A fly-to reports "reached" when the eased desired velocity has
/// magnitude² at or below this.
pub const FLY_TO_REACHED_SQ: f32 = 0.1;

/// Hover-noise time wrap period (seconds), preserving float precision
/// over long sessions.
pub const NOISE_WRAP_SECS: f32 = 3600.0;

/// Vertical jitter speed as a fraction of max speed during directional
/// movement.
pub const VERTICAL_JITTER_FRACTION: f32 = 0.25;

// --- Behavior state tuning ---

/// Max-speed boost while entering the arena.
pub const ENTER_ARENA_SPEED_BOOST: f32 = 1.5;

/// Speed factor while relocating.
pub const RELOCATE_SPEED_FACTOR: f32 = 0.6;

/// Angular-tracking factor during attack (slower, so players can dodge).
pub const ATTACK_TRACKING_FACTOR: f32 = 0.5;

/// Shots per weapon in one attack volley.
pub const ATTACK_VOLLEY_COUNT: u32 = 3;

/// Delay between shots within a volley (seconds).
pub const ATTACK_REFIRE_DELAY: f32 = 0.25;

/// Pause after a finished volley before planning again (seconds).
pub const ATTACK_PAUSE_SECS: f32 = 1.6;

/// Line-of-sight attack weight when the timer in Plan elapses.
pub const PLAN_ATTACK_WEIGHT: f32 = 0.55;

/// Weight of relocating (vs. re-planning) after a failed attack roll.
pub const PLAN_RELOCATE_WEIGHT: f32 = 0.5;

/// Duration of the pain spin (seconds).
pub const PAIN_DURATION_SECS: f32 = 0.9;

/// Chance that pain freezes the drone in place.
pub const PAIN_FREEZE_CHANCE: f32 = 0.5;

/// Duration of the hide-weakpoint reaction (seconds).
pub const HIDE_WEAKPOINT_SECS: f32 = 1.5;

/// Flat chance of the hide-weakpoint reaction when pain/dodge fail.
pub const HIDE_WEAKPOINT_CHANCE: f32 = 0.25;

/// Vertical displacement of a dodge (m).
pub const DODGE_HEIGHT: f32 = 1.2;

/// Lateral displacement of a dodge (m).
pub const DODGE_LATERAL: f32 = 1.0;

/// A dodge is finished when the remaining height difference drops
/// below this (m).
pub const DODGE_HEIGHT_EPSILON: f32 = 0.15;

/// Preferred standoff distance from the target player (m).
pub const STANDOFF_DISTANCE: f32 = 2.5;

/// Minimum usable standoff ray length; shorter means the spot is blocked.
pub const STANDOFF_MIN_DISTANCE: f32 = 1.0;

/// Half-angle of the randomized standoff search cone (radians).
pub const STANDOFF_CONE_HALF_ANGLE: f32 = 1.1;

// --- Death sequencing ---

/// Death roll weights: fall / malfunction / explode.
pub const DEATH_FALL_WEIGHT: f32 = 0.75;
pub const DEATH_MALFUNCTION_WEIGHT: f32 = 0.20;
pub const DEATH_EXPLODE_WEIGHT: f32 = 0.05;

/// A derelict drone whose health keeps dropping below this detonates.
pub const DERELICT_EXPLODE_HEALTH: f32 = -40.0;

/// Downward drift acceleration during a malfunction death (m/s²).
pub const MALFUNCTION_DRIFT_ACCEL: f32 = 3.0;

// --- Loot ---

/// Number of small-loot rolls on death.
pub const LOOT_SMALL_ROLLS: u32 = 3;

/// Chance each small-loot roll drops an item.
pub const LOOT_SMALL_CHANCE: f32 = 0.4;

/// Chance the single large-loot roll drops an item.
pub const LOOT_LARGE_CHANCE: f32 = 0.1;

// --- Combat ---

/// Damage multiplier when the receiver is a player.
pub const FRIENDLY_FIRE_FACTOR: f32 = 0.2;

/// Maximum weapon ray length (m).
pub const WEAPON_RAY_LENGTH: f32 = 60.0;

/// Horizontal aim cone half-angle for weapon mounts (radians).
pub const WEAPON_AIM_RANGE: f32 = 0.6;

// --- Health ---

pub const DRONE_MAX_HEALTH: f32 = 100.0;
pub const DRONE_PAIN_THRESHOLD: f32 = 25.0;
pub const PLAYER_MAX_HEALTH: f32 = 200.0;
