//! Drone behavior finite state machine.
//!
//! A closed set of states drives flight, combat, damage reactions, and
//! death sequencing. Each state carries only its own scratch data, and
//! every transition constructs a fresh state value: switching always
//! runs the old state's exit hook before the new state's enter hook.
//!
//! States decide their own transitions from timers, proximity and
//! collision signals, health thresholds, and wave-indexed randomized
//! policy checks. Anomalies (missing target, failed raycasts, leaving
//! the room) degrade to fallback transitions; nothing in here fails.

use glam::{Quat, Vec3};
use rand::Rng;

use dronewave_core::components::{MovementTuning, SensorState, WeaponMount};
use dronewave_core::constants::*;
use dronewave_core::enums::{LootKind, MovePattern, StateKind};
use dronewave_core::types::{ActorId, BodyState, HitSurface, RayCaster, RoomBounds, SteerCommand};
use dronewave_core::waves::WaveTable;

use crate::{motion, nav};

/// The drone's current target player, sampled this tick. Liveness is
/// checked by the host every tick; a dead or missing target arrives
/// here as `None`.
#[derive(Debug, Clone, Copy)]
pub struct TargetInfo {
    pub id: ActorId,
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Everything one state hook may read or mutate for its drone.
pub struct StateCtx<'a, R: Rng> {
    pub body: &'a BodyState,
    /// Mutable tuning a state may scale; restored from `tuning_default`
    /// on exit of any state that modified it.
    pub tuning: &'a mut MovementTuning,
    pub tuning_default: &'a MovementTuning,
    pub weapons: &'a mut [WeaponMount],
    pub target: Option<TargetInfo>,
    pub room: &'a RoomBounds,
    pub waves: &'a WaveTable,
    pub wave: usize,
    pub rays: &'a dyn RayCaster,
    pub rng: &'a mut R,
    pub sensor: SensorState,
    pub health: f32,
    pub time: f32,
    pub dt: f32,
}

/// Loot emitted while dying.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LootDrop {
    pub kind: LootKind,
    pub position: Vec3,
}

/// Output of one state update.
#[derive(Debug, Default)]
pub struct StateStep {
    /// Acceleration/torque to hand the movement integrator.
    pub command: SteerCommand,
    /// Index of a weapon mount to fire this tick.
    pub fire_weapon: Option<usize>,
    /// State to switch to (exit/enter run by [`switch`]).
    pub transition: Option<BehaviorState>,
    /// The drone should leave the world this tick.
    pub despawn: bool,
    /// Loot dropped this tick.
    pub loot: Vec<LootDrop>,
}

/// A drone's active behavior state with its per-activation scratch data.
#[derive(Debug, Clone, PartialEq)]
pub enum BehaviorState {
    EnterArena {
        entrance: Vec3,
    },
    Distribute {
        standoff: Vec3,
    },
    Plan {
        pattern: MovePattern,
        /// Fixed movement direction for strafe/vertical patterns.
        move_dir: Vec3,
        orbit_radius: f32,
        clockwise: bool,
        think_remaining: f32,
    },
    Attack {
        anchor: Vec3,
        volley_remaining: u32,
        next_weapon: usize,
        refire_remaining: f32,
        pause_remaining: f32,
    },
    Pain {
        /// Position to hold if the freeze roll succeeded.
        hold: Option<Vec3>,
        remaining: f32,
        clockwise: bool,
    },
    HideWeakpoint {
        remaining: f32,
    },
    Dodge {
        destination: Vec3,
        clockwise: bool,
    },
    Relocate {
        destination: Vec3,
    },
    ExitArena {
        overhead: Vec3,
        staging: Vec3,
        departing: bool,
    },
    Die,
    DieFall,
    DieMalfunction {
        drift: Vec3,
        spun_up: bool,
    },
    DieExplode,
}

impl BehaviorState {
    pub fn kind(&self) -> StateKind {
        match self {
            BehaviorState::EnterArena { .. } => StateKind::EnterArena,
            BehaviorState::Distribute { .. } => StateKind::Distribute,
            BehaviorState::Plan { .. } => StateKind::Plan,
            BehaviorState::Attack { .. } => StateKind::Attack,
            BehaviorState::Pain { .. } => StateKind::Pain,
            BehaviorState::HideWeakpoint { .. } => StateKind::HideWeakpoint,
            BehaviorState::Dodge { .. } => StateKind::Dodge,
            BehaviorState::Relocate { .. } => StateKind::Relocate,
            BehaviorState::ExitArena { .. } => StateKind::ExitArena,
            BehaviorState::Die => StateKind::Die,
            BehaviorState::DieFall => StateKind::DieFall,
            BehaviorState::DieMalfunction { .. } => StateKind::DieMalfunction,
            BehaviorState::DieExplode => StateKind::DieExplode,
        }
    }

    // ---- Constructors ----
    // Each transition builds a fresh state value; scratch data never
    // leaks between activations.

    /// Initial state for a freshly spawned drone: fly to an entrance
    /// point picked relative to the target player.
    pub fn enter_arena<R: Rng>(ctx: &mut StateCtx<R>) -> Self {
        let reference = ctx
            .target
            .map_or(ctx.body.position, |t| t.position);
        BehaviorState::EnterArena {
            entrance: nav::closest_room_entrance(ctx.rays, ctx.room, reference),
        }
    }

    /// Search for a standoff point by raycasting from the target player
    /// along a randomized cone. Falls back to a mirrored direction, and
    /// to [`Self::relocate`] when no valid point exists.
    pub fn distribute<R: Rng>(ctx: &mut StateCtx<R>) -> Self {
        let Some(target) = ctx.target else {
            return Self::exit_arena(ctx);
        };

        let mut base = ctx.body.position - target.position;
        base.y = 0.0;
        let base = base.try_normalize().unwrap_or(Vec3::Z);

        for attempt in 0..2 {
            let mut yaw = ctx
                .rng
                .gen_range(-STANDOFF_CONE_HALF_ANGLE..STANDOFF_CONE_HALF_ANGLE);
            if attempt == 1 {
                yaw += std::f32::consts::PI;
            }
            let pitch = ctx.rng.gen_range(0.0..0.3);
            let dir = (Quat::from_rotation_y(yaw) * base + Vec3::Y * pitch).normalize();

            let reach = STANDOFF_DISTANCE * 2.0;
            let standoff = match ctx.rays.raycast_nearest(target.position, dir, reach) {
                Some(hit) if hit.surface.is_static() => {
                    if hit.distance < STANDOFF_MIN_DISTANCE {
                        continue; // blocked, try the mirrored direction
                    }
                    let usable = (hit.distance - ROOM_WALL_INSET).min(STANDOFF_DISTANCE);
                    target.position + dir * usable
                }
                Some(_) => continue, // another actor occupies the spot
                None => target.position + dir * STANDOFF_DISTANCE,
            };
            if ctx.room.contains(standoff) {
                return BehaviorState::Distribute { standoff };
            }
        }

        Self::relocate(ctx)
    }

    /// Pick a movement pattern (biased toward backing off when close to
    /// the target) and start a wave-scaled decision timer.
    pub fn plan<R: Rng>(ctx: &mut StateCtx<R>) -> Self {
        let (pattern, move_dir, orbit_radius, clockwise) = pick_pattern(ctx);
        let think = ctx.waves.think_time(ctx.wave) * ctx.rng.gen_range(0.85..1.15);
        BehaviorState::Plan {
            pattern,
            move_dir,
            orbit_radius,
            clockwise,
            think_remaining: think,
        }
    }

    pub fn attack(anchor: Vec3) -> Self {
        BehaviorState::Attack {
            anchor,
            volley_remaining: ATTACK_VOLLEY_COUNT,
            next_weapon: 0,
            refire_remaining: ATTACK_REFIRE_DELAY,
            pause_remaining: ATTACK_PAUSE_SECS,
        }
    }

    pub fn pain<R: Rng>(ctx: &mut StateCtx<R>) -> Self {
        let hold = (ctx.rng.gen::<f32>() < PAIN_FREEZE_CHANCE).then_some(ctx.body.position);
        BehaviorState::Pain {
            hold,
            remaining: PAIN_DURATION_SECS,
            clockwise: ctx.rng.gen(),
        }
    }

    pub fn hide_weakpoint() -> Self {
        BehaviorState::HideWeakpoint {
            remaining: HIDE_WEAKPOINT_SECS,
        }
    }

    /// Lateral/vertical evasion target chosen from current height and
    /// the room bounds: climb when low, drop when high.
    pub fn dodge<R: Rng>(ctx: &mut StateCtx<R>) -> Self {
        let inner = ctx.room.inset();
        let mid = (inner.min.y + inner.max.y) * 0.5;
        let vertical = if ctx.body.position.y < mid {
            DODGE_HEIGHT
        } else {
            -DODGE_HEIGHT
        };
        let angle = ctx.rng.gen_range(0.0..std::f32::consts::TAU);
        let lateral = Vec3::new(angle.sin(), 0.0, angle.cos()) * DODGE_LATERAL;
        let destination = ctx
            .room
            .clamp_inside(ctx.body.position + lateral + Vec3::Y * vertical);
        BehaviorState::Dodge {
            destination,
            clockwise: ctx.rng.gen(),
        }
    }

    pub fn relocate<R: Rng>(ctx: &mut StateCtx<R>) -> Self {
        BehaviorState::Relocate {
            destination: nav::random_point_inside(ctx.room, ctx.rng),
        }
    }

    /// Graceful despawn path: climb above the room, then depart to a
    /// staging point outside it.
    pub fn exit_arena<R: Rng>(ctx: &mut StateCtx<R>) -> Self {
        BehaviorState::ExitArena {
            overhead: ctx.room.above_center(),
            staging: nav::closest_spawn_point(ctx.rays, ctx.room, ctx.body.position),
            departing: false,
        }
    }

    /// Roll the weighted death sequence: fall / malfunction / explode.
    pub fn roll_death<R: Rng>(ctx: &mut StateCtx<R>) -> Self {
        let roll: f32 = ctx.rng.gen();
        if roll < DEATH_FALL_WEIGHT {
            BehaviorState::DieFall
        } else if roll < DEATH_FALL_WEIGHT + DEATH_MALFUNCTION_WEIGHT {
            let angle = ctx.rng.gen_range(0.0..std::f32::consts::TAU);
            let lateral = Vec3::new(angle.sin(), 0.0, angle.cos());
            let drift = (ctx.body.velocity.normalize_or_zero() + lateral - Vec3::Y).normalize();
            BehaviorState::DieMalfunction {
                drift,
                spun_up: false,
            }
        } else {
            BehaviorState::DieExplode
        }
    }

    // ---- Hooks ----

    /// Entry hook. `prev` is the state being left.
    pub fn enter<R: Rng>(&mut self, _prev: StateKind, ctx: &mut StateCtx<R>) {
        match self {
            BehaviorState::EnterArena { .. } => {
                ctx.tuning.max_speed = ctx.tuning_default.max_speed * ENTER_ARENA_SPEED_BOOST;
            }
            BehaviorState::Plan { .. } => {
                ctx.tuning.max_speed = ctx.tuning_default.max_speed * ctx.waves.speed(ctx.wave);
            }
            BehaviorState::Attack { .. } => {
                // Slower tracking while attacking so players can dodge.
                ctx.tuning.max_angular_speed =
                    ctx.tuning_default.max_angular_speed * ATTACK_TRACKING_FACTOR;
                if let Some(target) = ctx.target {
                    motion::aim_weapons_at(ctx.body, ctx.weapons, target.position);
                }
            }
            BehaviorState::Relocate { .. } => {
                ctx.tuning.max_speed = ctx.tuning_default.max_speed * RELOCATE_SPEED_FACTOR;
            }
            _ => {}
        }
    }

    /// Exit hook. `next` is the state being entered. States that scaled
    /// the movement tuning restore the defaults here.
    pub fn exit<R: Rng>(&mut self, _next: StateKind, ctx: &mut StateCtx<R>) {
        match self {
            BehaviorState::EnterArena { .. }
            | BehaviorState::Plan { .. }
            | BehaviorState::Attack { .. }
            | BehaviorState::Relocate { .. } => {
                *ctx.tuning = *ctx.tuning_default;
            }
            _ => {}
        }
    }

    /// Per-tick update: steer, maybe fire, maybe transition.
    pub fn update<R: Rng>(&mut self, ctx: &mut StateCtx<R>) -> StateStep {
        let mut step = StateStep::default();
        match self {
            BehaviorState::EnterArena { entrance } => {
                let Some(target) = ctx.target else {
                    step.transition = Some(Self::exit_arena(ctx));
                    return step;
                };
                let reached = if let Some(push) = ctx.sensor.proximity_push {
                    step.command.accel =
                        motion::move_along(ctx.body, ctx.tuning, push, ctx.time, ctx.dt);
                    false
                } else {
                    let (accel, reached) = motion::fly_to(ctx.body, ctx.tuning, *entrance, ctx.dt);
                    step.command.accel = accel;
                    reached
                };
                let (aim, _) = motion::aim_towards(ctx.body, ctx.tuning, target.position, ctx.dt);
                step.command.torque = aim + motion::keep_upright(ctx.body, ctx.tuning, Vec3::Y, ctx.dt);

                let pushed_inside =
                    ctx.sensor.proximity_push.is_some() && ctx.room.contains(ctx.body.position);
                if reached || pushed_inside {
                    step.transition = Some(Self::distribute(ctx));
                }
            }

            BehaviorState::Distribute { standoff } => {
                let Some(target) = ctx.target else {
                    step.transition = Some(Self::exit_arena(ctx));
                    return step;
                };
                let (accel, reached) = motion::fly_to(ctx.body, ctx.tuning, *standoff, ctx.dt);
                step.command.accel = accel;
                let (aim, _) = motion::aim_towards(ctx.body, ctx.tuning, target.position, ctx.dt);
                step.command.torque = aim + motion::keep_upright(ctx.body, ctx.tuning, Vec3::Y, ctx.dt);

                // The spot is occupied or blocked: give up and plan from
                // wherever we are now.
                if reached || ctx.sensor.proximity_push.is_some() {
                    step.transition = Some(Self::plan(ctx));
                }
            }

            BehaviorState::Plan {
                pattern,
                move_dir,
                orbit_radius,
                clockwise,
                think_remaining,
            } => {
                let Some(target) = ctx.target else {
                    step.transition = Some(Self::exit_arena(ctx));
                    return step;
                };
                // Failsafe: a drone that ends up outside the room flies
                // back in through a fresh entrance.
                if !ctx.room.contains(ctx.body.position) {
                    step.transition = Some(Self::enter_arena(ctx));
                    return step;
                }

                // Environment contact switches the movement pattern
                // without leaving the state.
                if ctx.sensor.collided || ctx.sensor.proximity_push.is_some() {
                    let (p, d, r, c) = pick_pattern(ctx);
                    *pattern = p;
                    *move_dir = d;
                    *orbit_radius = r;
                    *clockwise = c;
                }

                let mut to_target = target.position - ctx.body.position;
                to_target.y = 0.0;
                step.command.accel = match *pattern {
                    MovePattern::Forward => {
                        motion::move_along(ctx.body, ctx.tuning, to_target, ctx.time, ctx.dt)
                    }
                    MovePattern::Backward => {
                        motion::move_along(ctx.body, ctx.tuning, -to_target, ctx.time, ctx.dt)
                    }
                    MovePattern::Strafe | MovePattern::Vertical => {
                        motion::move_along(ctx.body, ctx.tuning, *move_dir, ctx.time, ctx.dt)
                    }
                    MovePattern::Circle => motion::circle_strafe(
                        ctx.body,
                        ctx.tuning,
                        target.position,
                        *orbit_radius,
                        *clockwise,
                        ctx.time,
                        ctx.dt,
                    ),
                };
                let (aim, _) = motion::aim_towards(ctx.body, ctx.tuning, target.position, ctx.dt);
                step.command.torque = aim + motion::keep_upright(ctx.body, ctx.tuning, Vec3::Y, ctx.dt);

                *think_remaining -= ctx.dt;
                if *think_remaining <= 0.0 {
                    let anchor = ctx.body.position;
                    if line_of_sight(ctx, target)
                        && ctx.rng.gen::<f32>() < PLAN_ATTACK_WEIGHT
                    {
                        step.transition = Some(Self::attack(anchor));
                    } else if ctx.rng.gen::<f32>() < PLAN_RELOCATE_WEIGHT {
                        step.transition = Some(if ctx.rng.gen::<bool>() {
                            Self::distribute(ctx)
                        } else {
                            Self::relocate(ctx)
                        });
                    } else {
                        let (p, d, r, c) = pick_pattern(ctx);
                        *pattern = p;
                        *move_dir = d;
                        *orbit_radius = r;
                        *clockwise = c;
                        *think_remaining = ctx.waves.think_time(ctx.wave);
                    }
                }
            }

            BehaviorState::Attack {
                anchor,
                volley_remaining,
                next_weapon,
                refire_remaining,
                pause_remaining,
            } => {
                let Some(target) = ctx.target else {
                    step.transition = Some(Self::exit_arena(ctx));
                    return step;
                };
                let (accel, _) =
                    motion::hover_around(ctx.body, ctx.tuning, *anchor, ctx.time, ctx.dt);
                step.command.accel = accel;
                let (aim, _) = motion::aim_towards(ctx.body, ctx.tuning, target.position, ctx.dt);
                step.command.torque = aim + motion::keep_upright(ctx.body, ctx.tuning, Vec3::Y, ctx.dt);

                if *volley_remaining > 0 && !ctx.weapons.is_empty() {
                    *refire_remaining -= ctx.dt;
                    if *refire_remaining <= 0.0 {
                        motion::aim_weapons_at(ctx.body, ctx.weapons, target.position);
                        step.fire_weapon = Some(*next_weapon);
                        *next_weapon += 1;
                        if *next_weapon >= ctx.weapons.len() {
                            *next_weapon = 0;
                            *volley_remaining -= 1;
                        }
                        *refire_remaining = ATTACK_REFIRE_DELAY;
                    }
                } else {
                    *pause_remaining -= ctx.dt;
                    if *pause_remaining <= 0.0 {
                        step.transition = Some(Self::plan(ctx));
                    }
                }
            }

            BehaviorState::Pain {
                hold,
                remaining,
                clockwise,
            } => {
                step.command.accel = match hold {
                    Some(position) => motion::fly_to(ctx.body, ctx.tuning, *position, ctx.dt).0,
                    // Not frozen: keep drifting, only cancel gravity.
                    None => crate::steering::gravity_compensate(Vec3::ZERO, GRAVITY),
                };
                step.command.torque = motion::barrel_roll(ctx.body, ctx.tuning, *clockwise, ctx.dt);

                *remaining -= ctx.dt;
                if *remaining <= 0.0 {
                    step.transition = Some(Self::plan(ctx));
                }
            }

            BehaviorState::HideWeakpoint { remaining } => {
                let Some(target) = ctx.target else {
                    step.transition = Some(Self::exit_arena(ctx));
                    return step;
                };
                let (accel, _) = motion::hover_around(
                    ctx.body,
                    ctx.tuning,
                    ctx.body.position,
                    ctx.time,
                    ctx.dt,
                );
                step.command.accel = accel;
                let (aim, _) = motion::aim_away(ctx.body, ctx.tuning, target.position, ctx.dt);
                step.command.torque = aim + motion::keep_upright(ctx.body, ctx.tuning, Vec3::Y, ctx.dt);

                *remaining -= ctx.dt;
                if *remaining <= 0.0 {
                    step.transition = Some(Self::plan(ctx));
                }
            }

            BehaviorState::Dodge {
                destination,
                clockwise,
            } => {
                let (accel, _) = motion::fly_to(ctx.body, ctx.tuning, *destination, ctx.dt);
                step.command.accel = accel;
                step.command.torque = motion::barrel_roll(ctx.body, ctx.tuning, *clockwise, ctx.dt);

                if (ctx.body.position.y - destination.y).abs() < DODGE_HEIGHT_EPSILON {
                    step.transition = Some(Self::plan(ctx));
                }
            }

            BehaviorState::Relocate { destination } => {
                let (accel, reached) = motion::fly_to(ctx.body, ctx.tuning, *destination, ctx.dt);
                step.command.accel = accel;
                let aim_at = ctx
                    .target
                    .map_or(*destination, |t| t.position);
                let (aim, _) = motion::aim_towards(ctx.body, ctx.tuning, aim_at, ctx.dt);
                step.command.torque = aim + motion::keep_upright(ctx.body, ctx.tuning, Vec3::Y, ctx.dt);

                if reached {
                    step.transition = Some(Self::plan(ctx));
                }
            }

            BehaviorState::ExitArena {
                overhead,
                staging,
                departing,
            } => {
                let waypoint = if *departing { *staging } else { *overhead };
                let (accel, reached) = motion::fly_to(ctx.body, ctx.tuning, waypoint, ctx.dt);
                step.command.accel = accel;
                let (aim, _) = motion::aim_towards(ctx.body, ctx.tuning, waypoint, ctx.dt);
                step.command.torque = aim + motion::keep_upright(ctx.body, ctx.tuning, Vec3::Y, ctx.dt);

                if reached {
                    if *departing {
                        step.despawn = true;
                    } else {
                        *departing = true;
                    }
                }
            }

            BehaviorState::Die => {
                // Drop loot, then immediately roll the death sequence.
                let position = ctx.body.position;
                for _ in 0..LOOT_SMALL_ROLLS {
                    if ctx.rng.gen::<f32>() < LOOT_SMALL_CHANCE {
                        step.loot.push(LootDrop {
                            kind: LootKind::Small,
                            position,
                        });
                    }
                }
                if ctx.rng.gen::<f32>() < LOOT_LARGE_CHANCE {
                    step.loot.push(LootDrop {
                        kind: LootKind::Large,
                        position,
                    });
                }
                step.transition = Some(Self::roll_death(ctx));
            }

            BehaviorState::DieFall => {
                // No steering; the integrator lets gravity act.
                if ctx.sensor.collided || ctx.body.position.y < WORLD_FLOOR_Y {
                    step.despawn = true;
                } else if ctx.health < DERELICT_EXPLODE_HEALTH {
                    step.transition = Some(BehaviorState::DieExplode);
                }
            }

            BehaviorState::DieMalfunction { drift, spun_up } => {
                if !*spun_up {
                    // Double the spin over one tick.
                    step.command.torque = ctx.body.angular_velocity / ctx.dt;
                    *spun_up = true;
                }
                step.command.accel = *drift * MALFUNCTION_DRIFT_ACCEL;

                if ctx.sensor.collided || ctx.body.position.y < WORLD_FLOOR_Y {
                    step.despawn = true;
                } else if ctx.health < DERELICT_EXPLODE_HEALTH {
                    step.transition = Some(BehaviorState::DieExplode);
                }
            }

            BehaviorState::DieExplode => {
                step.despawn = true;
            }
        }
        step
    }
}

/// Switch a drone to a new state, running the exit hook of the old
/// state strictly before the enter hook of the new one. Returns the
/// (from, to) kinds for event reporting.
pub fn switch<R: Rng>(
    slot: &mut BehaviorState,
    mut next: BehaviorState,
    ctx: &mut StateCtx<R>,
) -> (StateKind, StateKind) {
    let from = slot.kind();
    let to = next.kind();
    slot.exit(to, ctx);
    next.enter(from, ctx);
    *slot = next;
    (from, to)
}

/// Damage reaction chain, evaluated when damage lands on a living drone
/// outside the arena-transit and death states. Fixed priority:
/// pain, then dodge, then hide-weakpoint.
pub fn on_damage<R: Rng>(
    current: StateKind,
    damage: f32,
    pain_threshold: f32,
    ctx: &mut StateCtx<R>,
) -> Option<BehaviorState> {
    if current.ignores_damage_reactions() {
        return None;
    }

    let already_reacting = matches!(
        current,
        StateKind::Attack | StateKind::Pain | StateKind::Dodge | StateKind::HideWeakpoint
    );

    if damage >= pain_threshold && ctx.rng.gen::<f32>() < ctx.waves.pain(ctx.wave) {
        Some(BehaviorState::pain(ctx))
    } else if !already_reacting && ctx.rng.gen::<f32>() < ctx.waves.dodge(ctx.wave) {
        Some(BehaviorState::dodge(ctx))
    } else if ctx.rng.gen::<f32>() < HIDE_WEAKPOINT_CHANCE {
        Some(BehaviorState::hide_weakpoint())
    } else {
        None
    }
}

/// True when nothing static blocks the drone's view of its target.
fn line_of_sight<R: Rng>(ctx: &mut StateCtx<R>, target: TargetInfo) -> bool {
    let to_target = target.position - ctx.body.position;
    let distance = to_target.length();
    if distance <= f32::EPSILON {
        return true;
    }
    match ctx
        .rays
        .raycast_nearest(ctx.body.position, to_target / distance, distance)
    {
        None => true,
        Some(hit) => matches!(hit.surface, HitSurface::Player(id) if id == target.id),
    }
}

/// Pick a movement pattern, biased toward backing off when close to the
/// target player.
fn pick_pattern<R: Rng>(ctx: &mut StateCtx<R>) -> (MovePattern, Vec3, f32, bool) {
    let target = ctx.target;
    let close = target.map_or(false, |t| {
        let mut d = t.position - ctx.body.position;
        d.y = 0.0;
        d.length() < STANDOFF_DISTANCE
    });

    let pattern = if close && ctx.rng.gen::<f32>() < 0.4 {
        MovePattern::Backward
    } else {
        match ctx.rng.gen_range(0..5) {
            0 => MovePattern::Forward,
            1 => MovePattern::Backward,
            2 => MovePattern::Strafe,
            3 => MovePattern::Vertical,
            _ => MovePattern::Circle,
        }
    };

    let to_target = target
        .map(|t| {
            let mut d = t.position - ctx.body.position;
            d.y = 0.0;
            d.try_normalize().unwrap_or(Vec3::Z)
        })
        .unwrap_or(Vec3::Z);

    let move_dir = match pattern {
        MovePattern::Strafe => {
            let side = if ctx.rng.gen::<bool>() { 1.0 } else { -1.0 };
            to_target.cross(Vec3::Y) * side
        }
        MovePattern::Vertical => {
            let inner = ctx.room.inset();
            let mid = (inner.min.y + inner.max.y) * 0.5;
            if ctx.body.position.y < mid {
                Vec3::Y
            } else {
                -Vec3::Y
            }
        }
        _ => to_target,
    };

    let orbit_radius = target
        .map(|t| {
            let mut d = t.position - ctx.body.position;
            d.y = 0.0;
            d.length().max(1.0)
        })
        .unwrap_or(1.0);

    (pattern, move_dir, orbit_radius, ctx.rng.gen())
}
