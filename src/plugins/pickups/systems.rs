use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::despawn::PendingDespawn;
use crate::common::layers::{
    free_pickup_layers, inert_layers, is_in_layer, junk_mask, pickup_hazard_mask, Layer,
};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::combat::DamageRequest;
use crate::plugins::physics::CollisionQueries;
use crate::plugins::presentation::{ParticleCue, PresentationCue, SoundId};

use super::{Crate, CrateSpawner, CrateState, Pickup, PickupState};

/// Spawn a fresh pickup resting at `pos`.
pub fn spawn_pickup(commands: &mut Commands, tunables: &Tunables, pos: Vec2) -> Entity {
    let t = &tunables.pickup;
    commands
        .spawn((
            Name::new("Pickup"),
            Pickup::fresh(),
            Sprite {
                color: Color::srgb(0.85, 0.55, 0.2),
                custom_size: Some(Vec2::splat(t.size)),
                ..default()
            },
            Transform::from_translation(pos.extend(1.0)).with_scale(Vec3::splat(t.ground_scale)),
            (
                RigidBody::Dynamic,
                Collider::rectangle(t.size, t.size),
                Mass(t.mass),
                AngularInertia(t.angular_inertia),
                free_pickup_layers(),
                LinearVelocity::ZERO,
                AngularVelocity::ZERO,
                // Grounding listens for CollisionStart.
                CollisionEventsEnabled,
            ),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// Spawn an intact crate centred at `pos`. It falls until it rests on something.
pub fn spawn_crate(commands: &mut Commands, tunables: &Tunables, pos: Vec2) -> Entity {
    let t = &tunables.crate_box;
    commands
        .spawn((
            Name::new("Crate"),
            Crate::new(t.max_health),
            Sprite {
                color: Color::srgb(0.55, 0.4, 0.25),
                custom_size: Some(Vec2::splat(t.size)),
                ..default()
            },
            Transform::from_translation(pos.extend(1.0)),
            (
                RigidBody::Dynamic,
                Collider::rectangle(t.size, t.size),
                Mass(t.mass),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::ZERO,
                CollisionLayers::new(
                    Layer::Crate,
                    [Layer::Ground, Layer::Platform, Layer::Actor, Layer::Pickup, Layer::Crate],
                ),
            ),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// A thrown pickup becomes grounded (and collectable) on its first contact with
/// anything an actor could stand on.
pub fn ground_thrown_pickups(
    mut started: MessageReader<CollisionStart>,
    mut q_pickups: Query<&mut Pickup>,
    q_layers: Query<&CollisionLayers>,
) {
    for ev in started.read() {
        let (pickup_side, other) = if q_pickups.contains(ev.collider1) {
            (ev.collider1, ev.collider2)
        } else if q_pickups.contains(ev.collider2) {
            (ev.collider2, ev.collider1)
        } else {
            continue;
        };

        let Ok(other_layers) = q_layers.get(other) else {
            continue;
        };
        let is_ground = [Layer::Ground, Layer::Platform, Layer::Crate]
            .into_iter()
            .any(|layer| is_in_layer(other_layers, layer));
        if !is_ground {
            continue;
        }

        if let Ok(mut pickup) = q_pickups.get_mut(pickup_side) {
            pickup.on_ground_contact();
        }
    }
}

/// Look for a victim around a free pickup. On a match the pickup is destroyed
/// and the victim is returned; it is never returned twice.
pub fn detonate(
    pickup: &mut Pickup,
    position: Vec2,
    queries: &impl CollisionQueries,
    tunables: &Tunables,
    now: f32,
) -> Option<Entity> {
    if pickup.state != PickupState::Free || pickup.last_owner.is_none() {
        return None;
    }
    let nearby = queries.overlap_circle(position, tunables.pickup.hit_radius, pickup_hazard_mask());
    let victim = pickup.detonation_target(&nearby)?;
    pickup
        .destroy(now + tunables.pickup.destroy_delay)
        .then_some(victim)
}

pub fn detonate_thrown_pickups(
    time: Res<Time>,
    tunables: Res<Tunables>,
    spatial: SpatialQuery,
    mut q: Query<(
        Entity,
        &mut Pickup,
        &Transform,
        &mut RigidBody,
        &mut LinearVelocity,
        &mut CollisionLayers,
        &mut Visibility,
    )>,
    mut damage: MessageWriter<DamageRequest>,
    mut cues: MessageWriter<PresentationCue>,
) {
    let now = time.elapsed_secs();
    for (e, mut pickup, tf, mut body, mut vel, mut layers, mut vis) in &mut q {
        let Some(victim) = detonate(&mut pickup, tf.translation.truncate(), &spatial, &tunables, now) else {
            continue;
        };

        *body = RigidBody::Kinematic;
        vel.0 = Vec2::ZERO;
        *layers = inert_layers();
        *vis = Visibility::Hidden;

        damage.write(DamageRequest { target: victim, amount: tunables.pickup.damage, source: Some(e) });
        cues.write(PresentationCue::sound(e, SoundId::Explosion));
        cues.write(PresentationCue::particle(e, ParticleCue::Explosion));
        debug!("pickup {e} detonated on {victim}");
    }
}

/// Break crates whose health ran out and drop their contents.
pub fn break_crates(
    mut commands: Commands,
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut q: Query<(
        Entity,
        &mut Crate,
        &Transform,
        &mut RigidBody,
        &mut LinearVelocity,
        &mut CollisionLayers,
        &mut Visibility,
    )>,
    mut cues: MessageWriter<PresentationCue>,
) {
    let now = time.elapsed_secs();
    for (e, mut crate_box, tf, mut body, mut vel, mut layers, mut vis) in &mut q {
        if !crate_box.break_open(now + tunables.crate_box.destroy_delay) {
            continue;
        }
        *body = RigidBody::Static;
        vel.0 = Vec2::ZERO;
        *layers = inert_layers();
        *vis = Visibility::Hidden;

        let contents = spawn_pickup(&mut commands, &tunables, tf.translation.truncate());
        cues.write(PresentationCue::sound(e, SoundId::CrateBreak));
        cues.write(PresentationCue::particle(e, ParticleCue::CrateBreak));
        debug!("crate {e} broke, dropped {contents}");
    }
}

/// Spawn a crate point that drops a new crate above itself every interval.
pub fn spawn_crate_spawner(commands: &mut Commands, tunables: &Tunables, pos: Vec2, now: f32) -> Entity {
    commands
        .spawn((
            Name::new("CrateSpawner"),
            CrateSpawner::new(tunables.crate_box.spawn_interval, now),
            Transform::from_translation(pos.extend(0.0)),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// Whether anything loose sits on a spawner at `pos`. `is_loose` rejects junk that
/// only passes through, such as a pickup in someone's hands.
pub fn spawner_locked(
    queries: &impl CollisionQueries,
    pos: Vec2,
    tunables: &Tunables,
    is_loose: impl Fn(Entity) -> bool,
) -> bool {
    queries
        .overlap_circle(pos, tunables.crate_box.junk_radius, junk_mask())
        .into_iter()
        .any(is_loose)
}

pub fn run_crate_spawners(
    mut commands: Commands,
    time: Res<Time>,
    tunables: Res<Tunables>,
    spatial: SpatialQuery,
    mut q: Query<(&mut CrateSpawner, &Transform)>,
    q_pickups: Query<&Pickup>,
) {
    let now = time.elapsed_secs();
    let is_loose = |e: Entity| q_pickups.get(e).map_or(true, |p| !p.is_picked_up());
    for (mut spawner, tf) in &mut q {
        let pos = tf.translation.truncate();
        if spawner.poll(now, spawner_locked(&spatial, pos, &tunables, is_loose)) {
            let drop_at = pos + Vec2::Y * tunables.crate_box.spawn_height;
            let e = spawn_crate(&mut commands, &tunables, drop_at);
            debug!("spawner dropped crate {e}");
        }
    }
}

/// Mark detonated pickups and broken crates for removal once their delay passed.
pub fn expire_wreckage(
    mut commands: Commands,
    time: Res<Time>,
    q_pickups: Query<(Entity, &Pickup), Without<PendingDespawn>>,
    q_crates: Query<(Entity, &Crate), Without<PendingDespawn>>,
) {
    let now = time.elapsed_secs();
    for (e, pickup) in &q_pickups {
        if let PickupState::Destroyed { remove_at } = pickup.state
            && now >= remove_at
        {
            commands.entity(e).insert(PendingDespawn);
        }
    }
    for (e, crate_box) in &q_crates {
        if let CrateState::Broken { remove_at } = crate_box.state
            && now >= remove_at
        {
            commands.entity(e).insert(PendingDespawn);
        }
    }
}
