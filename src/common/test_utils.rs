//! Test helpers.
//!
//! Systems that use `Commands` enqueue structural changes; we call `world.flush()`
//! after running so queued commands are applied before assertions.
//!
//! `FakeQueries` stands in for avian's spatial queries: every collider is a circle
//! with a layer membership, which is enough geometry for probes, overlaps and aim rays.

use std::time::Duration;

use avian2d::prelude::*;
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

use crate::plugins::physics::CollisionQueries;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Insert a generic `Time` (what `Res<Time>` resolves to) whose last step was `dt`
/// long and ended at `max(elapsed, dt)` seconds.
pub fn insert_time(world: &mut World, elapsed: f32, dt: f32) {
    let mut time = Time::<()>::default();
    let before = elapsed - dt;
    if before > 0.0 {
        time.advance_by(Duration::from_secs_f32(before));
    }
    time.advance_by(Duration::from_secs_f32(dt));
    world.insert_resource(time);
}

/// Advance an already inserted `Time` by `dt` seconds.
pub fn advance_time(world: &mut World, dt: f32) {
    world
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(dt));
}

#[derive(Clone, Copy, Debug)]
pub struct FakeCollider {
    pub entity: Entity,
    pub center: Vec2,
    pub radius: f32,
    pub layers: LayerMask,
}

#[derive(Default, Debug)]
pub struct FakeQueries {
    pub colliders: Vec<FakeCollider>,
}

impl FakeQueries {
    pub fn with(mut self, entity: Entity, center: Vec2, radius: f32, layers: impl Into<LayerMask>) -> Self {
        self.colliders.push(FakeCollider { entity, center, radius, layers: layers.into() });
        self
    }
}

#[inline]
fn intersects(a: LayerMask, b: LayerMask) -> bool {
    a.0 & b.0 != 0
}

impl CollisionQueries for FakeQueries {
    fn overlap_circle(&self, point: Vec2, radius: f32, mask: LayerMask) -> Vec<Entity> {
        self.colliders
            .iter()
            .filter(|c| intersects(c.layers, mask))
            .filter(|c| c.center.distance(point) <= c.radius + radius)
            .map(|c| c.entity)
            .collect()
    }

    fn raycast(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
        exclude: Option<Entity>,
    ) -> Option<Vec2> {
        let d = *direction;
        self.colliders
            .iter()
            .filter(|c| intersects(c.layers, mask) && Some(c.entity) != exclude)
            .filter_map(|c| {
                // Nearest root of |origin + t·d - center| = radius.
                let m = origin - c.center;
                let b = m.dot(d);
                let cc = m.length_squared() - c.radius * c.radius;
                let disc = b * b - cc;
                if disc < 0.0 {
                    return None;
                }
                let t = (-b - disc.sqrt()).max(0.0);
                (t <= max_distance).then_some(t)
            })
            .min_by(|a, b| a.total_cmp(b))
            .map(|t| origin + d * t)
    }
}

/// Spawn `n` empty entities to use as collider identities.
pub fn entities(world: &mut World, n: usize) -> Vec<Entity> {
    (0..n).map(|_| world.spawn_empty().id()).collect()
}
