//! Collision/overlap queries.
//!
//! Simulation code never calls avian directly. It takes `&impl CollisionQueries`,
//! which the systems satisfy with `SpatialQuery` and tests with a geometric fake.

use avian2d::prelude::*;
use bevy::prelude::*;

pub trait CollisionQueries {
    /// Every collider in `mask` overlapping the circle, in no particular order.
    fn overlap_circle(&self, point: Vec2, radius: f32, mask: LayerMask) -> Vec<Entity>;

    /// First point hit along the ray within `max_distance`, ignoring `exclude`.
    fn raycast(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
        exclude: Option<Entity>,
    ) -> Option<Vec2>;

    /// Whether anything in `mask` overlaps the circle.
    fn probe_circle(&self, point: Vec2, radius: f32, mask: LayerMask) -> bool {
        !self.overlap_circle(point, radius, mask).is_empty()
    }
}

impl CollisionQueries for SpatialQuery<'_, '_> {
    fn overlap_circle(&self, point: Vec2, radius: f32, mask: LayerMask) -> Vec<Entity> {
        self.shape_intersections(
            &Collider::circle(radius),
            point,
            0.0,
            &SpatialQueryFilter::from_mask(mask),
        )
    }

    fn raycast(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
        exclude: Option<Entity>,
    ) -> Option<Vec2> {
        let filter = SpatialQueryFilter::from_mask(mask).with_excluded_entities(exclude);
        self.cast_ray(origin, direction, max_distance, true, &filter)
            .map(|hit| origin + *direction * hit.distance)
    }
}
