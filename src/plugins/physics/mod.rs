//! Physics plugin: avian setup plus the query seam the simulation reads through.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

mod queries;

pub use queries::CollisionQueries;

pub fn plugin(app: &mut App) {
    let tunables = app.world().resource::<Tunables>();
    let ppm = tunables.pixels_per_meter;
    let gravity = tunables.world_gravity;
    app.add_plugins(PhysicsPlugins::default().with_length_unit(ppm));
    app.insert_resource(Gravity(gravity));
}
