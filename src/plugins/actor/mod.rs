//! Actor plugin: the player-controlled characters.
//!
//! Pipeline:
//! - Update: sample keyboard into `ActorCommand`, emit animation triggers
//! - FixedUpdate (see `SimSet`):
//!   Motion -> Vertical -> Equip -> .. -> Damage -> Lifecycle -> Commit
//!
//! An actor is a dynamic body without world gravity; it integrates its own
//! vertical velocity so the jump/phase rules stay deterministic per tick.
//!
//! ```text
//! Player (body: Vitals, Locomotion, Equipment, ActorRig, ...)
//! └── Model (turned to face)
//!     ├── HeldAnchor   <- drawn gun or held pickup
//!     └── HolsterAnchor <- holstered gun
//! ```

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::actor_layers;
use crate::common::schedule::SimSet;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::combat::apply_damage;
use crate::plugins::level::LevelInfo;
use crate::plugins::weapon::Weapon;

pub mod animation;
mod components;
pub mod equip;
pub mod input;
mod lifecycle;
pub mod motion;
pub mod vertical;

pub use animation::AnimationDriver;
pub use components::*;
pub use input::{ActorCommand, ActorKeybinds};

const ACTOR_COLORS: [Color; 2] = [Color::srgb(0.2, 0.75, 0.9), Color::srgb(0.95, 0.45, 0.35)];

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_actors)
        .add_systems(
            Update,
            (input::gather_input, animation::drive_animations)
                .chain()
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(FixedUpdate, motion::apply_motion.in_set(SimSet::Motion))
        .add_systems(FixedUpdate, vertical::update_vertical.in_set(SimSet::Vertical))
        .add_systems(FixedUpdate, equip::equip_pickups.in_set(SimSet::Equip))
        .add_systems(FixedUpdate, apply_damage::<Vitals>.in_set(SimSet::Damage))
        .add_systems(
            FixedUpdate,
            (lifecycle::check_deaths, lifecycle::respawn_due)
                .chain()
                .in_set(SimSet::Lifecycle),
        )
        .add_systems(
            FixedUpdate,
            (equip::commit_pickup_releases, input::clear_command_edges)
                .chain()
                .in_set(SimSet::Commit),
        );
}

fn spawn_actors(mut commands: Commands, tunables: Res<Tunables>, level: Res<LevelInfo>) {
    for (index, &point) in level.spawn_points.iter().enumerate() {
        spawn_actor(&mut commands, &tunables, index, point);
    }
}

/// Spawn one actor with its model, anchors and a drawn gun.
pub fn spawn_actor(commands: &mut Commands, tunables: &Tunables, index: usize, point: Vec2) -> Entity {
    let t = &tunables.actor;
    let name = format!("Player{}", index + 1);

    let body = commands
        .spawn((
            Name::new(name.clone()),
            Actor,
            Transform::from_translation(point.extend(2.0)),
            Visibility::default(),
            (
                RigidBody::Dynamic,
                Collider::circle(t.body_radius),
                actor_layers(false),
                GravityScale(0.0),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::ZERO,
                TranslationInterpolation,
            ),
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    let model = commands
        .spawn((
            Name::new("Model"),
            ActorModel,
            Sprite {
                color: ACTOR_COLORS[index % ACTOR_COLORS.len()],
                custom_size: Some(Vec2::splat(t.body_radius * 2.0)),
                ..default()
            },
            Transform::IDENTITY,
            ChildOf(body),
        ))
        .id();
    let held_anchor = commands
        .spawn((
            Name::new("HeldAnchor"),
            Transform::from_translation(t.held_anchor_offset.extend(0.5)),
            Visibility::default(),
            ChildOf(model),
        ))
        .id();
    let holster_anchor = commands
        .spawn((
            Name::new("HolsterAnchor"),
            Transform::from_translation(t.holster_anchor_offset.extend(-0.5)),
            Visibility::default(),
            ChildOf(model),
        ))
        .id();
    let gun = commands
        .spawn((
            Name::new("Gun"),
            Weapon::from_tunables(&tunables.weapon),
            Sprite {
                color: Color::srgb(0.8, 0.8, 0.85),
                custom_size: Some(Vec2::new(16.0, 5.0)),
                ..default()
            },
            Transform::IDENTITY,
            ChildOf(held_anchor),
        ))
        .id();

    let mut equipment = Equipment::new(Some(gun));
    equipment.hands = Hands::HoldingGun;

    commands.entity(body).insert((
        Vitals::new(t.max_health),
        Locomotion::default(),
        ActorCommand::default(),
        ActorKeybinds::for_player(index),
        ActorRig { model, held_anchor, holster_anchor },
        equipment,
        AnimationDriver::default(),
    ));

    info!("{name} spawned at {point}");
    body
}
