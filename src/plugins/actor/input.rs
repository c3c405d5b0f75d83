//! Keyboard sampling into per-actor commands.
//!
//! Input is read every frame in `Update` but the simulation only steps on fixed
//! ticks, so press/release edges are OR-ed in and cleared once a tick consumed them.

use bevy::prelude::*;

use super::components::Actor;

/// Keys driving one local actor.
#[derive(Component, Debug, Clone, Copy)]
pub struct ActorKeybinds {
    pub left: KeyCode,
    pub right: KeyCode,
    pub jump: KeyCode,
    pub phase_down: KeyCode,
    pub shoot: KeyCode,
    pub reload: KeyCode,
}

impl ActorKeybinds {
    pub const PLAYER_ONE: Self = Self {
        left: KeyCode::KeyA,
        right: KeyCode::KeyD,
        jump: KeyCode::KeyW,
        phase_down: KeyCode::KeyS,
        shoot: KeyCode::KeyF,
        reload: KeyCode::KeyR,
    };

    pub const PLAYER_TWO: Self = Self {
        left: KeyCode::ArrowLeft,
        right: KeyCode::ArrowRight,
        jump: KeyCode::ArrowUp,
        phase_down: KeyCode::ArrowDown,
        shoot: KeyCode::Slash,
        reload: KeyCode::Period,
    };

    /// Bindings for the `index`-th local player. Extra players reuse the second set.
    pub fn for_player(index: usize) -> Self {
        if index == 0 { Self::PLAYER_ONE } else { Self::PLAYER_TWO }
    }
}

/// What the actor was asked to do since the last fixed tick.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct ActorCommand {
    pub axis: f32,
    pub jump_held: bool,
    pub jump_pressed: bool,
    pub phase_down_pressed: bool,
    pub shoot_held: bool,
    pub shoot_pressed: bool,
    pub reload_pressed: bool,
}

impl ActorCommand {
    pub fn clear_edges(&mut self) {
        self.jump_pressed = false;
        self.phase_down_pressed = false;
        self.shoot_pressed = false;
        self.reload_pressed = false;
    }
}

/// Fold the current keyboard state into `cmd`.
pub fn sample(keys: &ButtonInput<KeyCode>, binds: &ActorKeybinds, cmd: &mut ActorCommand) {
    let mut axis = 0.0;
    if keys.pressed(binds.left) {
        axis -= 1.0;
    }
    if keys.pressed(binds.right) {
        axis += 1.0;
    }
    cmd.axis = axis;
    cmd.jump_held = keys.pressed(binds.jump);
    cmd.shoot_held = keys.pressed(binds.shoot);

    cmd.jump_pressed |= keys.just_pressed(binds.jump);
    cmd.phase_down_pressed |= keys.just_pressed(binds.phase_down);
    cmd.shoot_pressed |= keys.just_pressed(binds.shoot);
    cmd.reload_pressed |= keys.just_pressed(binds.reload);
}

/// Headless apps have no keyboard; commands then stay whatever tests wrote.
pub(super) fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut q: Query<(&ActorKeybinds, &mut ActorCommand), With<Actor>>,
) {
    let Some(keys) = keys else {
        return;
    };
    for (binds, mut cmd) in &mut q {
        sample(&keys, binds, &mut cmd);
    }
}

pub(super) fn clear_command_edges(mut q: Query<&mut ActorCommand, With<Actor>>) {
    for mut cmd in &mut q {
        cmd.clear_edges();
    }
}
