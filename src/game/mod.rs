//! App assembly.
//!
//! `configure_full` opens the window and adds rendering on top of the gameplay
//! plugins. `configure_headless` installs gameplay only; the caller brings time,
//! states and assets (see `tests/common`).

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::{schedule, state::GameState};
use crate::plugins;

#[cfg(target_os = "windows")]
use bevy::render::{
    settings::{Backends, PowerPreference, WgpuSettings},
    RenderPlugin,
};

/// Simulation rate. Jump charge and phase thresholds are tuned per tick at this rate.
pub const TICK_HZ: f64 = 64.0;

/// Open the arena window and run until closed. A rejected configuration exits
/// with an error status.
pub fn run() -> AppExit {
    App::new().add_plugins(configure_full).run()
}

pub fn configure_full(app: &mut App) {
    let window = Window {
        title: "Phase Arena".into(),
        resolution: WindowResolution::new(1280, 720),
        ..default()
    };
    let default_plugins = DefaultPlugins.set(WindowPlugin {
        primary_window: Some(window),
        ..default()
    });

    // Vulkan is unreliable on some Windows drivers.
    #[cfg(target_os = "windows")]
    let default_plugins = default_plugins.set(RenderPlugin {
        render_creation: WgpuSettings {
            backends: Some(Backends::DX12),
            power_preference: PowerPreference::HighPerformance,
            ..default()
        }
        .into(),
        ..default()
    });

    app.add_plugins(default_plugins)
        .insert_resource(Time::<Fixed>::from_hz(TICK_HZ));

    configure_game(app);
    plugins::register_render(app);
}

/// Gameplay without a window, renderer or lights.
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

fn configure_game(app: &mut App) {
    app.init_state::<GameState>();
    schedule::configure(app);
    plugins::register_gameplay(app);
}
