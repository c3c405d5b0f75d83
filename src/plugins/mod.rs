//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod actor;
pub mod combat;
pub mod core;
pub mod level;
pub mod physics;
pub mod pickups;
pub mod presentation;
pub mod projectiles;
pub mod weapon;

// Render only
pub mod camera;
pub mod lighting;

/// Everything the simulation needs. Order matters: `core` inserts `Tunables`,
/// which `physics` reads while building.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    presentation::plugin(app);
    combat::plugin(app);
    level::plugin(app);
    actor::plugin(app);
    weapon::plugin(app);
    pickups::plugin(app);
    app.add_plugins(ProjectilesPlugin);
}

/// Camera and lights. Needs `DefaultPlugins`.
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
}
