//! Level phase registry.
//!
//! The set of colliders tagged as phaseable ground. It is filled once while the
//! level is built and only read afterwards: actors never change membership, they
//! only toggle whether their own collider ignores the set.

use bevy::platform::collections::HashSet;
use bevy::prelude::*;

#[derive(Resource, Debug, Default)]
pub struct LevelPhaseRegistry {
    members: HashSet<Entity>,
}

impl LevelPhaseRegistry {
    pub fn register(&mut self, collider: Entity) {
        self.members.insert(collider);
    }

    #[inline]
    pub fn contains(&self, collider: Entity) -> bool {
        self.members.contains(&collider)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.members.iter().copied()
    }

    pub(crate) fn clear(&mut self) {
        self.members.clear();
    }
}
