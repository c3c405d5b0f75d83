//! Lighting plugin (Firefly) (render-only): one light following each actor.

use bevy::prelude::*;
use bevy_firefly::prelude::*;

use crate::plugins::actor::Actor;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(Update, light_new_actors);
}

/// The light is a child of the actor, so it follows without a system of its own.
fn light_new_actors(mut commands: Commands, q: Query<Entity, Added<Actor>>) {
    for actor in &q {
        commands.spawn((
            Name::new("ActorLight"),
            PointLight2d {
                color: Color::srgb(1.0, 0.9, 0.75),
                radius: 320.0,
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 10.0),
            ChildOf(actor),
        ));
    }
}
