use avian2d::prelude::*;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::layers::shot_obstruction_mask;
use crate::common::tunables::{Tunables, WeaponTunables};
use crate::plugins::actor::{Actor, ActorCommand, Equipment, Locomotion, Vitals};
use crate::plugins::physics::CollisionQueries;
use crate::plugins::presentation::{ParticleCue, PresentationCue, SoundId};
use crate::plugins::projectiles::SpawnProjectile;

use super::Weapon;

/// Randomness behind shot bloom.
#[derive(Resource)]
pub struct ShotRng(pub StdRng);

impl Default for ShotRng {
    fn default() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl ShotRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

/// Fire one shot from `muzzle` roughly along `forward`.
///
/// The direction is spread inside the bloom cone, then a ray finds what the shot
/// would hit; with no hit the shot aims at a fixed distance instead.
#[allow(clippy::too_many_arguments)]
pub fn fire<R: Rng>(
    weapon: &mut Weapon,
    now: f32,
    muzzle: Vec2,
    forward: Vec2,
    caster: Entity,
    queries: &impl CollisionQueries,
    rng: &mut R,
    t: &WeaponTunables,
) -> Option<SpawnProjectile> {
    if !weapon.try_fire(now) {
        return None;
    }
    let half_cone = t.bloom_degrees.to_radians();
    let spread = if half_cone > 0.0 { rng.random_range(-half_cone..=half_cone) } else { 0.0 };
    let direction = Dir2::new(Vec2::from_angle(spread).rotate(forward)).unwrap_or(Dir2::X);

    let target = queries
        .raycast(muzzle, direction, t.max_shoot_distance, shot_obstruction_mask(), Some(caster))
        .unwrap_or(muzzle + *direction * t.miss_distance);

    Some(SpawnProjectile { origin: muzzle, target, caster: Some(caster) })
}

/// Muzzle position for an actor at `body` facing `facing` (+1/-1).
#[inline]
pub fn muzzle_position(body: Vec2, facing: f32, offset: Vec2) -> Vec2 {
    body + Vec2::new(offset.x * facing, offset.y)
}

pub(super) fn operate_weapons(
    time: Res<Time>,
    tunables: Res<Tunables>,
    spatial: SpatialQuery,
    mut rng: ResMut<ShotRng>,
    q_actors: Query<
        (Entity, &Transform, &Vitals, &Locomotion, &ActorCommand, &Equipment),
        With<Actor>,
    >,
    mut q_weapons: Query<&mut Weapon>,
    mut shots: MessageWriter<SpawnProjectile>,
    mut cues: MessageWriter<PresentationCue>,
) {
    let now = time.elapsed_secs();

    for (actor, tf, vitals, loco, cmd, equip) in &q_actors {
        if vitals.is_dead() {
            continue;
        }
        let Some(gun) = equip.gun else {
            continue;
        };
        let Ok(mut weapon) = q_weapons.get_mut(gun) else {
            continue;
        };

        // A reload already running completes even with the gun holstered.
        if weapon.finish_reload_if_due(now) {
            cues.write(PresentationCue::sound(gun, SoundId::ReloadFinish));
        }
        if !equip.is_holding_gun() {
            continue;
        }

        if cmd.reload_pressed && weapon.begin_reload(now) {
            cues.write(PresentationCue::sound(gun, SoundId::ReloadStart));
        }
        // The gun is automatic; the fire rate does the gating.
        if !(cmd.shoot_pressed || cmd.shoot_held) {
            continue;
        }

        let muzzle = muzzle_position(tf.translation.truncate(), loco.facing(), tunables.actor.muzzle_offset);
        let forward = Vec2::X * loco.facing();
        if let Some(shot) = fire(
            &mut weapon,
            now,
            muzzle,
            forward,
            actor,
            &spatial,
            &mut rng.0,
            &tunables.weapon,
        ) {
            shots.write(shot);
            cues.write(PresentationCue::sound(gun, SoundId::Shoot));
            cues.write(PresentationCue::particle(gun, ParticleCue::MuzzleFlash));
        }
    }
}
