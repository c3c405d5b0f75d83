//! Buffered spawn requests.
//!
//! Weapons produce the intent, the projectile plugin consumes it and builds the
//! entity. Producers never touch projectile components.

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpawnProjectile {
    pub origin: Vec2,
    /// Point the shot's aim ray resolved to.
    pub target: Vec2,
    /// Wielder of the gun; never hit by its own projectile.
    pub caster: Option<Entity>,
}
