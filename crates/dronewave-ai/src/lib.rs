//! Drone behavior core for DRONEWAVE.
//!
//! Implements the steering math, movement primitives, and the behavior
//! finite state machine that drives each drone every physics tick.
//! No ECS dependency — operates on plain data and the collaborator
//! interfaces defined in `dronewave-core`.

pub mod fsm;
pub mod motion;
pub mod nav;
pub mod steering;

pub use dronewave_core as core;

#[cfg(test)]
mod tests;
