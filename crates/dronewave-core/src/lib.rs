//! Core types and definitions for the DRONEWAVE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, constants, events, wave tables, and the raycasting
//! interface the behavior core queries the world through. It has no
//! dependency on any ECS or runtime framework.

pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
pub mod waves;

#[cfg(test)]
mod tests;
