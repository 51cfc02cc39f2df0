//! Simulation engine — the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, paces waves, runs all
//! systems at a fixed tick rate, and produces `SimSnapshot`s.
//! Completely headless, enabling deterministic testing: the same seed
//! and the same call sequence always produce the same snapshots.

use glam::{Quat, Vec3};
use hecs::{Entity, World};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use dronewave_core::components::{Actor, Health, Player, WeaponSpec};
use dronewave_core::constants::DT;
use dronewave_core::enums::{GameMode, GamePhase};
use dronewave_core::events::SimEvent;
use dronewave_core::state::SimSnapshot;
use dronewave_core::types::{ActorId, BodyState, RoomBounds, SimTime};
use dronewave_core::waves::{WaveTable, WaveTableError};
use dronewave_ai::fsm::TargetInfo;

use crate::geometry::SceneView;
use crate::systems;
use crate::systems::combat::FireRequest;
use crate::systems::spawner::WaveState;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub mode: GameMode,
    pub waves: WaveTable,
    /// Extents of the playable room.
    pub room: RoomBounds,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            mode: GameMode::Normal,
            waves: WaveTable::standard(),
            room: RoomBounds::new(Vec3::new(-4.0, 0.0, -4.0), Vec3::new(4.0, 3.0, 4.0)),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    mode: GameMode,
    waves: WaveTable,
    room: RoomBounds,
    rng: ChaCha8Rng,
    next_actor_id: u32,
    wave_state: WaveState,
    despawn_buffer: Vec<(Entity, ActorId)>,
    fire_requests: Vec<FireRequest>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create a new engine. Fails when the wave table is malformed.
    pub fn new(config: SimConfig) -> Result<Self, WaveTableError> {
        config.waves.validate()?;
        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            mode: config.mode,
            waves: config.waves,
            room: config.room,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_actor_id: 0,
            wave_state: WaveState::default(),
            despawn_buffer: Vec::new(),
            fire_requests: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Begin the match on the first wave the mode plays.
    pub fn start(&mut self) {
        self.wave_state = WaveState::start(&self.waves, self.mode);
        self.time = SimTime::default();
        self.phase = GamePhase::Active;
        if !self.wave_state.complete {
            info!("match started on wave {}", self.wave_state.wave);
            self.events.push(SimEvent::WaveStarted {
                wave: self.wave_state.wave,
            });
        }
    }

    /// Add a player at a position. Players must be spawned before
    /// [`start`](Self::start) for the first wave to have a target.
    pub fn spawn_player(&mut self, position: Vec3) -> ActorId {
        world_setup::spawn_player(&mut self.world, position, &mut self.next_actor_id)
    }

    /// Drive a player's body from host tracking. Velocity is derived
    /// from the position delta so drones can lead a moving player.
    pub fn set_player_pose(&mut self, id: ActorId, position: Vec3, rotation: Quat) {
        for (_entity, (actor, _player, body)) in
            self.world.query_mut::<(&Actor, &Player, &mut BodyState)>()
        {
            if actor.id == id {
                body.velocity = (position - body.position) / DT;
                body.position = position;
                body.rotation = rotation;
            }
        }
    }

    /// Queue a host-side (player weapon) shot for the next tick.
    pub fn queue_shot(&mut self, shooter: ActorId, origin: Vec3, direction: Vec3, spec: WeaponSpec) {
        self.fire_requests.push(FireRequest {
            shooter,
            origin,
            direction,
            spec,
            spread_scale: 1.0,
        });
    }

    /// Apply direct damage to an actor, bypassing weapon resolution
    /// (host-side hazards and scripted effects). Dead drones are picked
    /// up by the per-tick death check in the behavior system.
    pub fn damage(&mut self, id: ActorId, amount: f32) {
        for (_entity, (actor, health, player)) in self
            .world
            .query_mut::<(&Actor, &mut Health, Option<&Player>)>()
        {
            if actor.id != id {
                continue;
            }
            let was_alive = health.is_alive();
            health.damage(amount);
            let died = was_alive && !health.is_alive();
            self.events.push(SimEvent::DamageDealt {
                target: id,
                amount,
                died,
            });
            if died && player.is_some() {
                self.events.push(SimEvent::PlayerDied { id });
            }
            return;
        }
    }

    /// Heal an actor. Healing is uncapped.
    pub fn heal(&mut self, id: ActorId, amount: f32) {
        for (_entity, (actor, health)) in self.world.query_mut::<(&Actor, &mut Health)>() {
            if actor.id == id {
                health.heal(amount);
                return;
            }
        }
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.mode,
            self.wave_state.wave,
            events,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Current wave pacing state.
    pub fn wave_state(&self) -> &WaveState {
        &self.wave_state
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Spawn a stationary drone at a position (for testing).
    #[cfg(test)]
    pub fn spawn_test_drone(&mut self, position: Vec3) -> ActorId {
        use dronewave_core::components::{
            DefaultTuning, Drone, MovementTuning, PainConfig, SensorState, SteerBuffer,
            WeaponMount, Weapons,
        };
        use dronewave_core::constants::DRONE_MAX_HEALTH;
        use dronewave_core::enums::MovePattern;
        use dronewave_ai::fsm::BehaviorState;

        let id = ActorId(self.next_actor_id);
        self.next_actor_id += 1;
        let tuning = MovementTuning::default();
        self.world.spawn((
            Drone,
            Actor { id },
            BodyState::at(position),
            Health::full(DRONE_MAX_HEALTH),
            PainConfig::default(),
            tuning,
            DefaultTuning(tuning),
            Weapons(vec![WeaponMount::at(Vec3::ZERO)]),
            SensorState::default(),
            SteerBuffer::default(),
            BehaviorState::Plan {
                pattern: MovePattern::Forward,
                move_dir: Vec3::Z,
                orbit_radius: 1.0,
                clockwise: true,
                think_remaining: f32::MAX,
            },
        ));
        self.wave_state.live += 1;
        id
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let (live_players, targets) = self.sample_players();

        // 1. Wave pacing and spawning (sees last tick's actor layout).
        let spawn_scene = SceneView::capture(&self.world, self.room);
        systems::spawner::run(
            &mut self.world,
            &mut self.rng,
            &spawn_scene,
            &self.waves,
            self.mode,
            &mut self.wave_state,
            &self.room,
            &live_players,
            &mut self.next_actor_id,
            DT,
            &mut self.events,
        );

        // 2. Capture the scene every drone queries this tick.
        let wave = self.wave_state.wave;
        let scene = SceneView::capture(&self.world, self.room);
        // 3. Proximity / collision sensing
        systems::sensors::run(&mut self.world, &scene);
        // 4. Behavior state machines
        systems::behavior::run(
            &mut self.world,
            &mut self.rng,
            &scene,
            &self.waves,
            wave,
            self.time.elapsed_secs,
            DT,
            &targets,
            &mut self.events,
            &mut self.fire_requests,
            &mut self.despawn_buffer,
        );
        // 5. Weapon fire resolution (drone volleys + host shots)
        systems::combat::run(
            &mut self.world,
            &mut self.rng,
            &scene,
            &self.waves,
            wave,
            self.time.elapsed_secs,
            DT,
            &targets,
            &mut self.fire_requests,
            &mut self.events,
        );
        // 6. Movement integration
        systems::movement::run(&mut self.world);
        // 7. Cleanup (explosions, settled wrecks, exits)
        systems::cleanup::run(
            &mut self.world,
            &mut self.despawn_buffer,
            &mut self.wave_state,
            &mut self.events,
        );

        self.check_game_over(live_players.is_empty());
    }

    /// Live player positions (for spawn pacing) and target info (for
    /// behavior). Dead players are excluded from both, which is what
    /// makes drones stop chasing them.
    fn sample_players(&self) -> (Vec<(ActorId, Vec3)>, Vec<TargetInfo>) {
        let mut live = Vec::new();
        let mut targets = Vec::new();
        for (_entity, (actor, _player, body, health)) in self
            .world
            .query::<(&Actor, &Player, &BodyState, &Health)>()
            .iter()
        {
            if health.is_alive() {
                live.push((actor.id, body.position));
                targets.push(TargetInfo {
                    id: actor.id,
                    position: body.position,
                    velocity: body.velocity,
                });
            }
        }
        live.sort_by_key(|(id, _)| *id);
        targets.sort_by_key(|t| t.id);
        (live, targets)
    }

    fn check_game_over(&mut self, players_dead: bool) {
        if self.phase != GamePhase::Active {
            return;
        }
        let won = self.wave_state.complete;
        let arena_empty = self.wave_state.live == 0;
        if arena_empty && (won || players_dead) {
            info!(
                "game over after {} cleared waves",
                self.wave_state.cleared
            );
            self.phase = GamePhase::GameOver;
            self.events.push(SimEvent::GameOver {
                waves_cleared: self.wave_state.cleared,
            });
        }
    }
}
