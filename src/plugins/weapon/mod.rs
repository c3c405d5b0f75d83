//! Weapon plugin: ammo, fire-rate gating, reloads and hitscan aiming.
//!
//! A shot is a raycast that picks the projectile's target point; the projectile
//! itself then flies there and does the damage.

use bevy::prelude::*;

use crate::common::schedule::SimSet;

mod components;
pub mod systems;

pub use components::*;
pub use systems::ShotRng;

pub fn plugin(app: &mut App) {
    app.init_resource::<ShotRng>()
        .add_systems(FixedUpdate, systems::operate_weapons.in_set(SimSet::Weapon));
}
