//! Core plugin: shared resources, parameter validation and deferred removal.

use bevy::prelude::*;

use crate::common::despawn::despawn_marked;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    // Tests may insert their own parameter set first.
    app.init_resource::<Tunables>();
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
    app.add_systems(Startup, validate_tunables)
        .add_systems(PostUpdate, despawn_marked);
}

/// Refuse to run with an inconsistent parameter set.
fn validate_tunables(tunables: Res<Tunables>, mut exit: MessageWriter<AppExit>) {
    match tunables.validate() {
        Ok(()) => info!("tunables ok"),
        Err(err) => {
            error!("invalid tunables: {err}");
            exit.write(AppExit::error());
        }
    }
}
