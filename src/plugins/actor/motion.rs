use std::f32::consts::PI;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::components::{Actor, ActorModel, ActorRig, Locomotion, Vitals};
use super::input::ActorCommand;

/// Record this tick's horizontal input. Zero input keeps the last facing.
pub fn steer(loco: &mut Locomotion, axis: f32) {
    loco.axis = axis.clamp(-1.0, 1.0);
    if loco.axis != 0.0 {
        loco.last_button_x = loco.axis;
    }
}

#[inline]
pub fn facing_rotation(last_button_x: f32) -> Quat {
    if last_button_x < 0.0 { Quat::from_rotation_y(PI) } else { Quat::IDENTITY }
}

/// Frame-rate independent turn toward the facing target.
pub fn smooth_facing(current: Quat, last_button_x: f32, rate: f32, dt: f32) -> Quat {
    let alpha = 1.0 - (-rate * dt).exp();
    current.slerp(facing_rotation(last_button_x), alpha)
}

/// Horizontal run velocity. The vertical step adds the jump boost on top.
pub(super) fn apply_motion(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut q_actors: Query<
        (&Vitals, &ActorCommand, &ActorRig, &mut Locomotion, &mut LinearVelocity),
        With<Actor>,
    >,
    mut q_models: Query<&mut Transform, With<ActorModel>>,
) {
    let t = &tunables.actor;
    let dt = time.delta_secs();

    for (vitals, cmd, rig, mut loco, mut vel) in &mut q_actors {
        if vitals.is_dead() {
            continue;
        }
        steer(&mut loco, cmd.axis);
        vel.x = loco.axis * t.movement_speed;

        if let Ok(mut model) = q_models.get_mut(rig.model) {
            model.rotation = smooth_facing(model.rotation, loco.last_button_x, t.facing_smooth_rate, dt);
        }
    }
}
