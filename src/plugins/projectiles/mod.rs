//! Projectiles plugin: message-driven spawning and per-tick flight.
//!
//! ```text
//!  FixedUpdate
//!  Weapon:  operate_weapons ──SpawnProjectile──▶ Hazards: spawn_projectiles
//!  Hazards: advance_projectiles ──DamageRequest──▶ Damage: apply_damage::<T>
//!           └─ spent ─▶ PendingDespawn ─▶ (PostUpdate) despawn_marked
//! ```
//!
//! A projectile flies at constant speed toward the point its shot resolved to.
//! It ends on the first hittable entity other than its caster, or when its
//! lifetime reaches the kill time, whichever comes first. Either way it ends once.

use bevy::prelude::*;

use crate::common::schedule::SimSet;

mod components;
mod messages;
pub mod systems;

pub use components::*;
pub use messages::SpawnProjectile;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SpawnProjectile>();

        // Projectiles spawned this tick start moving on the next one.
        app.add_systems(
            FixedUpdate,
            (systems::advance_projectiles, systems::spawn_projectiles)
                .chain()
                .in_set(SimSet::Hazards),
        );
    }
}
