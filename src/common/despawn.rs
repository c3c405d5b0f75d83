//! Deferred removal.
//!
//! Fixed-step systems never despawn directly. They mark `PendingDespawn` and the
//! mark is committed in `PostUpdate`, after every fixed tick of the frame ran.

use bevy::prelude::*;

/// Marker: entity should be removed from the world.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

/// Despawn entities marked for removal.
pub fn despawn_marked(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
