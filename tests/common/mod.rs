//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `phase_arena::game::configure_headless` to install gameplay plugins.
//! - every `app.update()` advances time by exactly one fixed step.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use phase_arena::common::state::GameState;
use phase_arena::common::tunables::Tunables;

pub const STEP: f64 = 1.0 / 64.0;

pub fn app_headless() -> App {
    app_headless_with(Tunables::default())
}

pub fn app_headless_with(tunables: Tunables) -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(STEP)));
    app.insert_resource(Time::<Fixed>::from_seconds(STEP));
    app.insert_resource(tunables);

    phase_arena::game::configure_headless(&mut app);
    app
}

/// Enter the arena and let spawns settle.
pub fn enter_game(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    app.update();
    app.update();
}

pub fn run_for(app: &mut App, seconds: f64) {
    let frames = (seconds / STEP).ceil() as usize;
    for _ in 0..frames {
        app.update();
    }
}

/// Entities carrying `T`, in spawn order.
pub fn all<T: Component>(app: &mut App) -> Vec<Entity> {
    let mut v: Vec<Entity> = app
        .world_mut()
        .query_filtered::<Entity, With<T>>()
        .iter(app.world())
        .collect();
    v.sort();
    v
}
