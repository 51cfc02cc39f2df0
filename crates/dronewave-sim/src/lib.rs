//! Simulation engine for DRONEWAVE.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate, and
//! produces [`SimSnapshot`](dronewave_core::state::SimSnapshot)s for
//! the host each tick.

pub mod engine;
pub mod geometry;
pub mod systems;
pub mod world_setup;

pub use dronewave_core as core;
pub use engine::{SimConfig, SimulationEngine};
