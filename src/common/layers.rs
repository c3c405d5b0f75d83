//! Collision layers and the masks built from them.
//!
//! Every member of the level phase registry carries `Platform`. Actors ignore the
//! whole registered set by dropping `Platform` from their filters, which keeps the
//! ignore relation per actor without touching the platforms themselves.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    /// Solid, unphaseable ground.
    Ground,
    /// Phaseable ground (registry members).
    Platform,
    Actor,
    Pickup,
    Projectile,
    Crate,
}

/// Geometry an actor can stand on.
#[inline]
pub fn ground_probe_mask() -> LayerMask {
    [Layer::Ground, Layer::Platform, Layer::Crate].into()
}

/// Entities a projectile can hurt.
#[inline]
pub fn hittable_mask() -> LayerMask {
    [Layer::Actor, Layer::Crate].into()
}

/// Entities a thrown pickup detonates on.
#[inline]
pub fn pickup_hazard_mask() -> LayerMask {
    Layer::Actor.into()
}

/// Loose objects that keep a crate spawner locked.
#[inline]
pub fn junk_mask() -> LayerMask {
    [Layer::Crate, Layer::Pickup].into()
}

/// Geometry that stops a shot's aim ray.
#[inline]
pub fn shot_obstruction_mask() -> LayerMask {
    [Layer::Ground, Layer::Platform, Layer::Actor, Layer::Crate].into()
}

/// Layers for a living actor. While phasing the platform set is ignored.
#[inline]
pub fn actor_layers(ignore_platforms: bool) -> CollisionLayers {
    if ignore_platforms {
        CollisionLayers::new(Layer::Actor, [Layer::Ground, Layer::Crate])
    } else {
        CollisionLayers::new(Layer::Actor, [Layer::Ground, Layer::Platform, Layer::Crate])
    }
}

/// Layers for a pickup resting or flying freely.
#[inline]
pub fn free_pickup_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Pickup, [Layer::Ground, Layer::Platform, Layer::Crate, Layer::Pickup])
}

/// Held pickups ride the anchor and collide with nothing.
#[inline]
pub fn held_pickup_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Pickup, LayerMask::NONE)
}

/// Dead actors, detonated pickups and broken crates: invisible to every query.
#[inline]
pub fn inert_layers() -> CollisionLayers {
    CollisionLayers::new(LayerMask::NONE, LayerMask::NONE)
}

#[inline]
pub fn is_in_layer(layers: &CollisionLayers, layer: Layer) -> bool {
    layers.memberships.has_all(layer)
}
