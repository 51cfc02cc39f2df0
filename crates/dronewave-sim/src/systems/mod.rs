//! Simulation systems, run in a fixed order each tick.

pub mod behavior;
pub mod cleanup;
pub mod combat;
pub mod movement;
pub mod sensors;
pub mod snapshot;
pub mod spawner;
