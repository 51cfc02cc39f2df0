//! Movement integration.
//!
//! Semi-implicit Euler over each drone's steer command. Gravity is
//! applied unconditionally; live behaviors compensate for it in their
//! commands, derelict death states do not, so wrecks fall without any
//! special casing here.

use glam::Quat;
use hecs::World;

use dronewave_core::components::{Drone, SteerBuffer};
use dronewave_core::constants::{DT, GRAVITY};
use dronewave_core::types::BodyState;

pub fn run(world: &mut World) {
    for (_entity, (body, steer, _drone)) in
        world.query_mut::<(&mut BodyState, &SteerBuffer, &Drone)>()
    {
        let command = steer.command;
        body.velocity += (command.accel + GRAVITY) * DT;
        body.position += body.velocity * DT;

        body.angular_velocity += command.torque * DT;
        body.rotation =
            (Quat::from_scaled_axis(body.angular_velocity * DT) * body.rotation).normalize();
    }
}
