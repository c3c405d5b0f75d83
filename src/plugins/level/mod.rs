//! Level plugin: builds the arena and the phase registry.
//!
//! ```text
//!        [platform]          [platform]        <- phaseable, registered
//!              [    platform    ]
//!   [crate]                          [crate]
//! ==========   =================   ==========  <- unphaseable floor
//!  (gap: off-map)                  (gap: off-map)
//! ```

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::pickups::{spawn_crate, spawn_crate_spawner, spawn_pickup};

pub mod registry;

pub use registry::LevelPhaseRegistry;

const FLOOR_Y: f32 = -220.0;
const FLOOR_THICKNESS: f32 = 30.0;
const PLATFORM_THICKNESS: f32 = 12.0;

/// Per-level constants read by the lifecycle rules.
#[derive(Resource, Debug, Clone)]
pub struct LevelInfo {
    /// Anything whose centre falls below this height died off-map.
    pub kill_y: f32,
    /// Where an actor that fell off-map is parked until it respawns.
    pub safety_respawn_point: Vec2,
    pub spawn_points: Vec<Vec2>,
}

impl Default for LevelInfo {
    fn default() -> Self {
        Self {
            kill_y: FLOOR_Y - 400.0,
            safety_respawn_point: Vec2::new(0.0, 160.0),
            spawn_points: vec![Vec2::new(-340.0, FLOOR_Y + 60.0), Vec2::new(340.0, FLOOR_Y + 60.0)],
        }
    }
}

/// Marker for phaseable ground.
#[derive(Component, Debug, Clone, Copy)]
pub struct Phaseable;

pub fn plugin(app: &mut App) {
    app.insert_resource(LevelInfo::default())
        .insert_resource(LevelPhaseRegistry::default())
        .add_systems(OnEnter(GameState::InGame), (spawn_arena, spawn_props));
}

fn spawn_arena(mut commands: Commands, mut registry: ResMut<LevelPhaseRegistry>) {
    registry.clear();

    let ground_layers = CollisionLayers::new(
        Layer::Ground,
        [Layer::Actor, Layer::Pickup, Layer::Projectile, Layer::Crate],
    );
    let platform_layers = CollisionLayers::new(
        Layer::Platform,
        [Layer::Actor, Layer::Pickup, Layer::Projectile, Layer::Crate],
    );

    let floor_color = Color::srgb(0.25, 0.27, 0.33);
    let platform_color = Color::srgb(0.36, 0.42, 0.52);

    let floors = [
        (Vec2::new(-380.0, FLOOR_Y), 240.0),
        (Vec2::new(0.0, FLOOR_Y), 440.0),
        (Vec2::new(380.0, FLOOR_Y), 240.0),
    ];
    for (i, (pos, width)) in floors.into_iter().enumerate() {
        commands.spawn((
            Name::new(format!("Floor{i}")),
            Sprite {
                color: floor_color,
                custom_size: Some(Vec2::new(width, FLOOR_THICKNESS)),
                ..default()
            },
            Transform::from_translation(pos.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(width, FLOOR_THICKNESS),
            ground_layers,
            DespawnOnExit(GameState::InGame),
        ));
    }

    let platforms = [
        (Vec2::new(-260.0, FLOOR_Y + 150.0), 180.0),
        (Vec2::new(260.0, FLOOR_Y + 150.0), 180.0),
        (Vec2::new(0.0, FLOOR_Y + 280.0), 260.0),
    ];
    for (i, (pos, width)) in platforms.into_iter().enumerate() {
        let e = commands
            .spawn((
                Name::new(format!("Platform{i}")),
                Phaseable,
                Sprite {
                    color: platform_color,
                    custom_size: Some(Vec2::new(width, PLATFORM_THICKNESS)),
                    ..default()
                },
                Transform::from_translation(pos.extend(0.0)),
                RigidBody::Static,
                Collider::rectangle(width, PLATFORM_THICKNESS),
                platform_layers,
                DespawnOnExit(GameState::InGame),
            ))
            .id();
        registry.register(e);
    }

    info!("level built: {} phaseable platforms", registry.len());
}

fn spawn_props(mut commands: Commands, time: Res<Time>, tunables: Res<Tunables>) {
    let rest = FLOOR_Y + FLOOR_THICKNESS * 0.5;
    let crate_half = tunables.crate_box.size * 0.5;
    let now = time.elapsed_secs();
    for x in [-420.0, 420.0] {
        let spot = Vec2::new(x, rest + crate_half);
        spawn_crate(&mut commands, &tunables, spot);
        spawn_crate_spawner(&mut commands, &tunables, spot, now);
    }
    spawn_pickup(&mut commands, &tunables, Vec2::new(0.0, rest + tunables.pickup.size * 0.5));
}

#[cfg(test)]
mod tests;
