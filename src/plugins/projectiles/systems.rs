use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::despawn::PendingDespawn;
use crate::common::layers::{hittable_mask, Layer};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::combat::DamageRequest;
use crate::plugins::physics::CollisionQueries;

use super::{Projectile, ProjectileState, SpawnProjectile, Termination};

/// Age the projectile by `dt` and look for a victim at `position`.
///
/// Returns the termination on the one tick it happens; spent projectiles never
/// report again.
pub fn step_projectile(
    projectile: &mut Projectile,
    position: Vec2,
    dt: f32,
    queries: &impl CollisionQueries,
) -> Option<Termination> {
    if projectile.is_spent() {
        return None;
    }

    projectile.lifetime += dt;
    let ended = if projectile.lifetime >= projectile.kill_time {
        Some(Termination::TimedOut)
    } else {
        queries
            .overlap_circle(position, projectile.hit_radius, hittable_mask())
            .into_iter()
            .find(|&e| Some(e) != projectile.caster)
            .map(Termination::Hit)
    };

    if let Some(end) = ended {
        projectile.state = ProjectileState::Spent(end);
    }
    ended
}

/// Consumer: build a projectile entity for every spawn request.
pub fn spawn_projectiles(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut requests: MessageReader<SpawnProjectile>,
) {
    let t = &tunables.projectile;
    for req in requests.read() {
        let projectile = Projectile::new(req, t);
        let velocity = projectile.velocity();
        commands.spawn((
            Name::new("Projectile"),
            projectile,
            Sprite {
                color: Color::srgb(1.0, 0.85, 0.3),
                custom_size: Some(Vec2::splat(t.hit_radius)),
                ..default()
            },
            Transform::from_translation(req.origin.extend(2.0)),
            RigidBody::Kinematic,
            Collider::circle(t.hit_radius * 0.5),
            Sensor,
            // Overlaps are polled; the body itself collides with nothing.
            CollisionLayers::new(Layer::Projectile, LayerMask::NONE),
            LinearVelocity(velocity),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

pub fn advance_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    spatial: SpatialQuery,
    mut q: Query<
        (Entity, &mut Projectile, &Transform, &mut LinearVelocity),
        Without<PendingDespawn>,
    >,
    mut damage: MessageWriter<DamageRequest>,
) {
    let dt = time.delta_secs();
    for (e, mut projectile, tf, mut vel) in &mut q {
        match step_projectile(&mut projectile, tf.translation.truncate(), dt, &spatial) {
            None => {
                vel.0 = projectile.velocity();
            }
            Some(end) => {
                if let Termination::Hit(target) = end {
                    damage.write(DamageRequest {
                        target,
                        amount: projectile.damage,
                        source: projectile.caster,
                    });
                }
                vel.0 = Vec2::ZERO;
                commands.entity(e).insert(PendingDespawn);
            }
        }
    }
}
