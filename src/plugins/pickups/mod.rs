//! Pickups and crates: throwables, their grounding and detonation, the
//! breakable boxes that drop them and the spawners that keep crates coming.

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::schedule::SimSet;
use crate::common::state::GameState;
use crate::plugins::combat::apply_damage;

mod components;
pub mod systems;

pub use components::*;
pub use systems::{spawn_crate, spawn_crate_spawner, spawn_pickup};

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, systems::detonate_thrown_pickups.in_set(SimSet::Hazards))
        .add_systems(FixedUpdate, apply_damage::<Crate>.in_set(SimSet::Damage))
        .add_systems(
            FixedUpdate,
            (systems::break_crates, systems::run_crate_spawners).in_set(SimSet::Lifecycle),
        )
        .add_systems(FixedUpdate, systems::expire_wreckage.in_set(SimSet::Commit))
        .add_systems(
            FixedPostUpdate,
            systems::ground_thrown_pickups
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        );
}
