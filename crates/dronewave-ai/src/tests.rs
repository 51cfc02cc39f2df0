use approx::assert_relative_eq;
use glam::{Quat, Vec3};
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use dronewave_core::components::{MovementTuning, SensorState, WeaponMount};
use dronewave_core::constants::*;
use dronewave_core::enums::StateKind;
use dronewave_core::types::{BodyState, RayCaster, RayHit, RoomBounds};
use dronewave_core::waves::WaveTable;

use crate::fsm::{self, BehaviorState, StateCtx, TargetInfo};
use crate::motion;
use crate::steering;

// ---- Steering math ----

#[test]
fn test_clamp_acceleration_never_exceeds_max() {
    let samples = [
        Vec3::new(100.0, 0.0, 0.0),
        Vec3::new(-3.0, 40.0, 7.0),
        Vec3::new(0.001, -0.002, 0.0005),
        Vec3::ZERO,
        Vec3::new(1e6, 1e6, 1e6),
    ];
    for delta in samples {
        for dt in [0.001, 0.02, 0.5] {
            let accel = steering::clamp_acceleration(delta, dt, 24.0);
            assert!(
                accel.length() <= 24.0 + 1e-3,
                "clamped accel {} exceeds bound for delta {delta:?} dt {dt}",
                accel.length()
            );
        }
    }
}

#[test]
fn test_clamp_acceleration_preserves_direction() {
    let delta = Vec3::new(10.0, -4.0, 2.0);
    let accel = steering::clamp_acceleration(delta, 0.02, 24.0);
    let cos = accel.normalize().dot(delta.normalize());
    assert!(cos > 0.9999, "direction changed: cos {cos}");
    assert!((accel.length() - 24.0).abs() < 1e-3, "should rescale to exactly max");
}

#[test]
fn test_ease_toward_caps_at_max_speed() {
    let raw = Vec3::new(0.0, 0.0, 100.0);
    let eased = steering::ease_toward(raw, 50.0, 4.0, DEFAULT_EASE_INNER, DEFAULT_EASE_SLOPE);
    assert!(eased.length() <= 4.0 + 1e-5);
}

#[test]
fn test_ease_toward_zero_inside_inner_threshold() {
    // sqrt(distance) below the inner threshold gives a zero scale.
    let inner = 1.0;
    let raw = Vec3::new(0.0, 0.0, 4.0);
    let eased = steering::ease_toward(raw, 0.5, 4.0, inner, 1.0);
    assert_eq!(eased, Vec3::ZERO);
}

#[test]
fn test_ease_toward_monotonic_in_distance() {
    let raw = Vec3::new(0.0, 0.0, 4.0);
    let mut previous = 0.0;
    for step in 1..40 {
        let distance = step as f32 * 0.25;
        let speed = steering::ease_toward(
            raw,
            distance,
            4.0,
            DEFAULT_EASE_INNER,
            DEFAULT_EASE_SLOPE,
        )
        .length();
        assert!(
            speed >= previous - 1e-5,
            "speed decreased with distance at {distance}"
        );
        previous = speed;
    }
}

#[test]
fn test_gravity_compensate_cancels_gravity() {
    let accel = steering::gravity_compensate(Vec3::ZERO, GRAVITY);
    assert_eq!(accel, -GRAVITY);
}

#[test]
fn test_hover_noise_bounded_and_deterministic() {
    for i in 0..500 {
        let t = i as f32 * 0.173;
        for axis in 0..3 {
            let v = steering::hover_noise(t, 7.5, 0.5, axis);
            assert!((-1.0..=1.0).contains(&v), "noise {v} out of range");
            assert_eq!(v, steering::hover_noise(t, 7.5, 0.5, axis));
        }
    }
}

#[test]
fn test_hover_noise_wraps_every_hour() {
    let a = steering::hover_noise(12.34, 3.0, 0.5, 1);
    let b = steering::hover_noise(12.34 + NOISE_WRAP_SECS, 3.0, 0.5, 1);
    assert!((a - b).abs() < 1e-4);
}

// ---- Movement primitives ----

fn integrate(body: &mut BodyState, accel: Vec3, dt: f32) {
    body.velocity += (accel + GRAVITY) * dt;
    body.position += body.velocity * dt;
}

#[test]
fn test_fly_to_converges_without_false_reached() {
    let tuning = MovementTuning::default();
    let target = Vec3::new(2.0, 1.5, -1.0);
    let mut body = BodyState::at(Vec3::new(-2.0, 0.5, 2.0));

    let mut reached_at = None;
    for tick in 0..600 {
        let (accel, reached) = motion::fly_to(&body, &tuning, target, DT);
        if reached {
            reached_at = Some(tick);
            break;
        }
        integrate(&mut body, accel, DT);
    }

    let tick = reached_at.expect("fly_to never reported reached");
    assert!(tick > 5, "reached far too early at tick {tick}");
    // At the reach report the eased desired velocity is near-stopped,
    // which only happens close to the target.
    assert!(
        body.position.distance(target) < 1.0,
        "reported reached at distance {}",
        body.position.distance(target)
    );
}

#[test]
fn test_fly_to_not_reached_at_distance() {
    let tuning = MovementTuning::default();
    let body = BodyState::at(Vec3::ZERO);
    let (_, reached) = motion::fly_to(&body, &tuning, Vec3::new(10.0, 0.0, 0.0), DT);
    assert!(!reached);
}

#[test]
fn test_aim_along_reports_aligned_when_facing() {
    let tuning = MovementTuning::default();
    let body = BodyState::at(Vec3::ZERO);
    let (torque, aligned) = motion::aim_along(&body, &tuning, Vec3::Z, DT);
    assert!(aligned);
    assert_eq!(torque, Vec3::ZERO);
}

#[test]
fn test_aim_along_turns_toward_direction() {
    let tuning = MovementTuning::default();
    let body = BodyState::at(Vec3::ZERO);
    let (torque, aligned) = motion::aim_along(&body, &tuning, Vec3::X, DT);
    assert!(!aligned);
    // Turning from +Z to +X is a positive yaw.
    assert!(torque.y > 0.0, "expected positive yaw torque, got {torque:?}");
}

#[test]
fn test_barrel_roll_reaches_full_spin_in_one_tick() {
    let tuning = MovementTuning::default();
    let body = BodyState::at(Vec3::ZERO);
    let torque = motion::barrel_roll(&body, &tuning, true, DT);
    let angular_velocity = body.angular_velocity + torque * DT;
    assert!((angular_velocity.length() - tuning.max_angular_speed).abs() < 1e-3);
    assert!(angular_velocity.dot(body.forward()) > 0.0);
}

#[test]
fn test_keep_upright_rights_a_tilted_body() {
    let tuning = MovementTuning::default();
    let mut body = BodyState::at(Vec3::ZERO);
    // Rolled 90° around forward: up points along +X.
    body.rotation = Quat::from_rotation_z(-std::f32::consts::FRAC_PI_2);
    let torque = motion::keep_upright(&body, &tuning, Vec3::Y, DT);
    assert!(torque.length() > 0.0);
    // The righting axis for up=+X toward +Y is +Z (the forward axis).
    assert!(torque.z > 0.0, "expected roll-correcting torque, got {torque:?}");
}

#[test]
fn test_aim_weapons_clamps_to_cone() {
    let body = BodyState::at(Vec3::ZERO);
    let mut mounts = [WeaponMount::at(Vec3::ZERO)];
    // Target far off to the side, well beyond the aim cone.
    motion::aim_weapons_at(&body, &mut mounts, Vec3::new(10.0, 0.0, 0.1));
    let dir = motion::muzzle_direction(&mounts[0]);
    let deviation = dir.angle_between(Vec3::Z);
    assert!(
        (deviation - WEAPON_AIM_RANGE).abs() < 1e-3,
        "deviation {deviation} should clamp to the cone"
    );
}

// ---- FSM fixture ----

struct NoHits;

impl RayCaster for NoHits {
    fn raycast_all(&self, _origin: Vec3, _direction: Vec3, _max: f32) -> Vec<RayHit> {
        Vec::new()
    }
}

struct Fixture {
    body: BodyState,
    tuning: MovementTuning,
    tuning_default: MovementTuning,
    weapons: Vec<WeaponMount>,
    target: Option<TargetInfo>,
    room: RoomBounds,
    waves: WaveTable,
    wave: usize,
    rays: NoHits,
    sensor: SensorState,
    health: f32,
    time: f32,
}

impl Fixture {
    fn new() -> Self {
        Self {
            body: BodyState::at(Vec3::new(0.0, 1.5, 0.0)),
            tuning: MovementTuning::default(),
            tuning_default: MovementTuning::default(),
            weapons: vec![WeaponMount::at(Vec3::new(0.0, -0.1, 0.2))],
            target: Some(TargetInfo {
                id: dronewave_core::types::ActorId(0),
                position: Vec3::new(2.0, 1.7, 2.0),
                velocity: Vec3::ZERO,
            }),
            room: RoomBounds::new(Vec3::new(-4.0, 0.0, -4.0), Vec3::new(4.0, 3.0, 4.0)),
            waves: WaveTable::standard(),
            wave: 0,
            rays: NoHits,
            sensor: SensorState::default(),
            health: DRONE_MAX_HEALTH,
            time: 0.0,
        }
    }

    fn ctx<'a, R: rand::Rng>(&'a mut self, rng: &'a mut R) -> StateCtx<'a, R> {
        StateCtx {
            body: &self.body,
            tuning: &mut self.tuning,
            tuning_default: &self.tuning_default,
            weapons: &mut self.weapons,
            target: self.target,
            room: &self.room,
            waves: &self.waves,
            wave: self.wave,
            rays: &self.rays,
            rng,
            sensor: self.sensor,
            health: self.health,
            time: self.time,
            dt: DT,
        }
    }
}

fn zero_rolls() -> StepRng {
    StepRng::new(0, 0)
}

fn high_rolls() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

// ---- State switching ----

#[test]
fn test_switch_runs_exit_before_enter() {
    let mut fixture = Fixture::new();
    let mut rng = zero_rolls();
    let default_speed = fixture.tuning_default.max_speed;

    // Plan scales max speed on enter.
    let mut state = BehaviorState::plan(&mut fixture.ctx(&mut rng));
    state.enter(StateKind::Distribute, &mut fixture.ctx(&mut rng));
    assert_ne!(fixture.tuning.max_speed, default_speed);

    // Switching to EnterArena must first restore the default (Plan's
    // exit), then apply the entry boost on top of the default. If the
    // hooks ran in the wrong order the boost would be wiped.
    let next = BehaviorState::enter_arena(&mut fixture.ctx(&mut rng));
    let (from, to) = fsm::switch(&mut state, next, &mut fixture.ctx(&mut rng));
    assert_eq!(from, StateKind::Plan);
    assert_eq!(to, StateKind::EnterArena);
    assert!(
        (fixture.tuning.max_speed - default_speed * ENTER_ARENA_SPEED_BOOST).abs() < 1e-5
    );
}

#[test]
fn test_exit_restores_default_tuning() {
    let mut fixture = Fixture::new();
    let mut rng = zero_rolls();

    let mut state = BehaviorState::relocate(&mut fixture.ctx(&mut rng));
    state.enter(StateKind::Plan, &mut fixture.ctx(&mut rng));
    assert!(fixture.tuning.max_speed < fixture.tuning_default.max_speed);

    state.exit(StateKind::Plan, &mut fixture.ctx(&mut rng));
    assert_eq!(fixture.tuning, fixture.tuning_default);
}

// ---- Damage reactions ----

#[test]
fn test_damage_reaction_pain_has_priority() {
    let mut fixture = Fixture::new();
    // Pain and dodge would both pass; pain must win.
    fixture.waves.pain_chance = vec![1.0; fixture.waves.len()];
    fixture.waves.dodge_chance = vec![1.0; fixture.waves.len()];
    let mut rng = zero_rolls();

    let reaction = fsm::on_damage(
        StateKind::Plan,
        DRONE_PAIN_THRESHOLD + 1.0,
        DRONE_PAIN_THRESHOLD,
        &mut fixture.ctx(&mut rng),
    );
    assert_eq!(reaction.map(|s| s.kind()), Some(StateKind::Pain));
}

#[test]
fn test_damage_reaction_dodge_below_pain_threshold() {
    let mut fixture = Fixture::new();
    fixture.waves.dodge_chance = vec![1.0; fixture.waves.len()];
    let mut rng = zero_rolls();

    let reaction = fsm::on_damage(
        StateKind::Plan,
        DRONE_PAIN_THRESHOLD - 1.0,
        DRONE_PAIN_THRESHOLD,
        &mut fixture.ctx(&mut rng),
    );
    assert_eq!(reaction.map(|s| s.kind()), Some(StateKind::Dodge));
}

#[test]
fn test_damage_reaction_dodge_suppressed_while_reacting() {
    let mut fixture = Fixture::new();
    fixture.waves.pain_chance = vec![0.0; fixture.waves.len()];
    fixture.waves.dodge_chance = vec![1.0; fixture.waves.len()];
    let mut rng = zero_rolls();

    // Already dodging: the dodge arm is skipped and the flat
    // hide-weakpoint roll (0.0 < 0.25) decides.
    let reaction = fsm::on_damage(
        StateKind::Dodge,
        DRONE_PAIN_THRESHOLD + 1.0,
        DRONE_PAIN_THRESHOLD,
        &mut fixture.ctx(&mut rng),
    );
    assert_eq!(reaction.map(|s| s.kind()), Some(StateKind::HideWeakpoint));
}

#[test]
fn test_damage_reaction_none_when_rolls_fail() {
    let mut fixture = Fixture::new();
    fixture.waves.pain_chance = vec![0.0; fixture.waves.len()];
    fixture.waves.dodge_chance = vec![0.0; fixture.waves.len()];
    let mut rng = high_rolls();

    let reaction = fsm::on_damage(
        StateKind::Plan,
        DRONE_PAIN_THRESHOLD - 1.0,
        DRONE_PAIN_THRESHOLD,
        &mut fixture.ctx(&mut rng),
    );
    assert!(reaction.is_none());
}

#[test]
fn test_damage_reaction_ignored_in_transit_states() {
    let mut fixture = Fixture::new();
    fixture.waves.pain_chance = vec![1.0; fixture.waves.len()];
    let mut rng = zero_rolls();

    for kind in [StateKind::EnterArena, StateKind::ExitArena, StateKind::DieFall] {
        let reaction = fsm::on_damage(
            kind,
            1000.0,
            DRONE_PAIN_THRESHOLD,
            &mut fixture.ctx(&mut rng),
        );
        assert!(reaction.is_none(), "{kind:?} should ignore damage reactions");
    }
}

// ---- State transitions ----

#[test]
fn test_enter_arena_without_target_exits() {
    let mut fixture = Fixture::new();
    fixture.target = None;
    let mut rng = zero_rolls();

    let mut state = BehaviorState::EnterArena {
        entrance: Vec3::new(0.0, 1.5, 3.0),
    };
    let step = state.update(&mut fixture.ctx(&mut rng));
    assert_eq!(
        step.transition.map(|s| s.kind()),
        Some(StateKind::ExitArena)
    );
}

#[test]
fn test_plan_failsafe_outside_room() {
    let mut fixture = Fixture::new();
    fixture.body.position = Vec3::new(20.0, 1.5, 0.0);
    let mut rng = zero_rolls();

    let mut state = BehaviorState::plan(&mut fixture.ctx(&mut rng));
    let step = state.update(&mut fixture.ctx(&mut rng));
    assert_eq!(
        step.transition.map(|s| s.kind()),
        Some(StateKind::EnterArena)
    );
}

#[test]
fn test_die_drops_loot_and_rolls_fall() {
    let mut fixture = Fixture::new();
    // Zero rolls: every small-loot roll passes, the large roll passes,
    // and the death roll lands in the fall bracket.
    let mut rng = zero_rolls();

    let mut state = BehaviorState::Die;
    let step = state.update(&mut fixture.ctx(&mut rng));
    assert_eq!(step.loot.len() as u32, LOOT_SMALL_ROLLS + 1);
    assert_eq!(step.transition.map(|s| s.kind()), Some(StateKind::DieFall));
}

#[test]
fn test_die_rolls_explode_on_high_roll() {
    let mut fixture = Fixture::new();
    let mut rng = high_rolls();

    let mut state = BehaviorState::Die;
    let step = state.update(&mut fixture.ctx(&mut rng));
    assert_eq!(
        step.transition.map(|s| s.kind()),
        Some(StateKind::DieExplode)
    );
}

#[test]
fn test_die_fall_despawns_on_collision() {
    let mut fixture = Fixture::new();
    fixture.sensor.collided = true;
    let mut rng = zero_rolls();

    let mut state = BehaviorState::DieFall;
    let step = state.update(&mut fixture.ctx(&mut rng));
    assert!(step.despawn);
    // No steering while falling.
    assert_eq!(step.command.accel, Vec3::ZERO);
}

#[test]
fn test_die_fall_explodes_on_overkill() {
    let mut fixture = Fixture::new();
    fixture.health = DERELICT_EXPLODE_HEALTH - 1.0;
    let mut rng = zero_rolls();

    let mut state = BehaviorState::DieFall;
    let step = state.update(&mut fixture.ctx(&mut rng));
    assert_eq!(
        step.transition.map(|s| s.kind()),
        Some(StateKind::DieExplode)
    );
}

#[test]
fn test_die_fall_despawns_below_floor() {
    let mut fixture = Fixture::new();
    fixture.body.position.y = WORLD_FLOOR_Y - 1.0;
    let mut rng = zero_rolls();

    let mut state = BehaviorState::DieFall;
    let step = state.update(&mut fixture.ctx(&mut rng));
    assert!(step.despawn);
}

#[test]
fn test_die_malfunction_doubles_spin_once() {
    let mut fixture = Fixture::new();
    fixture.body.angular_velocity = Vec3::new(0.0, 2.0, 0.0);
    let mut rng = zero_rolls();

    let mut state = BehaviorState::DieMalfunction {
        drift: -Vec3::Y,
        spun_up: false,
    };
    let step = state.update(&mut fixture.ctx(&mut rng));
    // Torque integrates to the current spin over one tick, doubling it.
    let gained = step.command.torque * DT;
    assert_relative_eq!(gained.y, fixture.body.angular_velocity.y, epsilon = 1e-4);

    let step = state.update(&mut fixture.ctx(&mut rng));
    assert_eq!(step.command.torque, Vec3::ZERO);
}

#[test]
fn test_exit_arena_two_legs_then_despawn() {
    let mut fixture = Fixture::new();
    let mut rng = zero_rolls();

    let mut state = BehaviorState::ExitArena {
        overhead: fixture.body.position, // already there
        staging: fixture.body.position,
        departing: false,
    };
    let step = state.update(&mut fixture.ctx(&mut rng));
    assert!(!step.despawn, "first leg only switches to departing");

    let step = state.update(&mut fixture.ctx(&mut rng));
    assert!(step.despawn, "second leg reached: despawn");
}

#[test]
fn test_attack_fires_full_volley_then_plans() {
    let mut fixture = Fixture::new();
    let mut rng = zero_rolls();

    let mut state = BehaviorState::attack(fixture.body.position);
    state.enter(StateKind::Plan, &mut fixture.ctx(&mut rng));

    let mut shots = 0;
    let mut planned = false;
    for _ in 0..2000 {
        let step = state.update(&mut fixture.ctx(&mut rng));
        if step.fire_weapon.is_some() {
            shots += 1;
        }
        if let Some(next) = step.transition {
            assert_eq!(next.kind(), StateKind::Plan);
            planned = true;
            break;
        }
    }
    assert_eq!(shots, ATTACK_VOLLEY_COUNT, "one weapon, one shot per volley round");
    assert!(planned, "attack never returned to planning");
}

#[test]
fn test_dodge_completes_on_height_match() {
    let mut fixture = Fixture::new();
    let mut rng = zero_rolls();

    let mut state = BehaviorState::Dodge {
        destination: fixture.body.position + Vec3::new(1.0, 0.05, 0.0),
        clockwise: true,
    };
    let step = state.update(&mut fixture.ctx(&mut rng));
    assert_eq!(step.transition.map(|s| s.kind()), Some(StateKind::Plan));
}

#[test]
fn test_distribute_falls_back_to_relocate_when_blocked() {
    struct ShortHits;
    impl RayCaster for ShortHits {
        fn raycast_all(&self, origin: Vec3, direction: Vec3, _max: f32) -> Vec<RayHit> {
            // Every ray is blocked almost immediately.
            vec![RayHit {
                point: origin + direction * 0.2,
                normal: -direction,
                distance: 0.2,
                surface: dronewave_core::types::HitSurface::Wall,
            }]
        }
    }

    let mut fixture = Fixture::new();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let rays = ShortHits;
    let mut ctx = StateCtx {
        body: &fixture.body,
        tuning: &mut fixture.tuning,
        tuning_default: &fixture.tuning_default,
        weapons: &mut fixture.weapons,
        target: fixture.target,
        room: &fixture.room,
        waves: &fixture.waves,
        wave: 0,
        rays: &rays,
        rng: &mut rng,
        sensor: SensorState::default(),
        health: DRONE_MAX_HEALTH,
        time: 0.0,
        dt: DT,
    };
    let state = BehaviorState::distribute(&mut ctx);
    assert_eq!(state.kind(), StateKind::Relocate);
}

#[test]
fn test_distribute_finds_standoff_in_open_room() {
    let mut fixture = Fixture::new();
    // Target near the room center so the whole standoff reach is inside.
    if let Some(target) = fixture.target.as_mut() {
        target.position = Vec3::new(0.0, 1.5, 0.0);
    }
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let state = BehaviorState::distribute(&mut fixture.ctx(&mut rng));
    match state {
        BehaviorState::Distribute { standoff } => {
            assert!(fixture.room.contains(standoff));
        }
        other => panic!("expected Distribute, got {:?}", other.kind()),
    }
}
