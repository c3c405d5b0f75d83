use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::{actor_layers, inert_layers};
use crate::common::tunables::Tunables;
use crate::plugins::combat::Damageable;
use crate::plugins::level::LevelInfo;
use crate::plugins::presentation::{ParticleCue, PresentationCue, SoundId};
use crate::plugins::weapon::Weapon;

use super::components::{Actor, ActorRig, DeathCause, Equipment, Locomotion, Vitals};
use super::equip::draw_gun;

impl Damageable for Vitals {
    const HIT_SOUND: SoundId = SoundId::Hit;
    const HIT_PARTICLE: ParticleCue = ParticleCue::Hit;

    fn current_health(&self) -> i32 {
        self.current_health
    }

    fn damage(&mut self, amount: i32) -> bool {
        if self.is_dead() {
            return false;
        }
        self.current_health = (self.current_health - amount.max(0)).max(0);
        true
    }
}

/// Kill actors whose health ran out or that fell off the map.
pub(super) fn check_deaths(
    time: Res<Time>,
    tunables: Res<Tunables>,
    level: Res<LevelInfo>,
    mut q: Query<
        (
            Entity,
            &Name,
            &mut Vitals,
            &mut Locomotion,
            &mut Equipment,
            &mut Transform,
            &mut LinearVelocity,
            &mut CollisionLayers,
            &mut Visibility,
        ),
        With<Actor>,
    >,
    mut cues: MessageWriter<PresentationCue>,
) {
    let now = time.elapsed_secs();
    for (e, name, mut vitals, mut loco, mut equip, mut tf, mut vel, mut layers, mut vis) in &mut q {
        let Some(cause) = vitals.death_cause(tf.translation.y, level.kill_y) else {
            continue;
        };

        vitals.die(now + tunables.actor.respawn_delay);
        loco.reset();
        vel.0 = Vec2::ZERO;
        *layers = inert_layers();
        *vis = Visibility::Hidden;
        if equip.held_pickup().is_some() {
            equip.release_requested = true;
            equip.release_from = Some(tf.translation.truncate());
        }

        match cause {
            DeathCause::Depleted => {
                cues.write(PresentationCue::sound(e, SoundId::Death));
                cues.write(PresentationCue::particle(e, ParticleCue::Death));
                info!("{name} died");
            }
            DeathCause::OffMap => {
                let z = tf.translation.z;
                tf.translation = level.safety_respawn_point.extend(z);
                info!("{name} fell off the map");
            }
        }
    }
}

/// Bring dead actors back in place once their delay passed.
pub(super) fn respawn_due(
    mut commands: Commands,
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut q: Query<
        (
            Entity,
            &Name,
            &ActorRig,
            &mut Vitals,
            &mut Locomotion,
            &mut Equipment,
            &mut LinearVelocity,
            &mut CollisionLayers,
            &mut Visibility,
        ),
        With<Actor>,
    >,
    mut q_weapons: Query<&mut Weapon>,
    mut cues: MessageWriter<PresentationCue>,
) {
    let now = time.elapsed_secs();
    for (e, name, rig, mut vitals, mut loco, mut equip, mut vel, mut layers, mut vis) in &mut q {
        if !vitals.respawn_due(now) {
            continue;
        }

        vitals.restore();
        loco.reset();
        vel.0 = Vec2::ZERO;
        *layers = actor_layers(false);
        *vis = Visibility::Inherited;

        if let Some(gun) = equip.gun
            && let Ok(mut weapon) = q_weapons.get_mut(gun)
        {
            weapon.reset();
        }
        // A pickup still in hand is thrown at commit, which redraws the gun.
        if equip.held_pickup().is_none() {
            draw_gun(
                &mut commands,
                e,
                &mut equip,
                rig,
                &mut q_weapons,
                now + tunables.actor.draw_grace,
                &mut cues,
            );
        }

        cues.write(PresentationCue::sound(e, SoundId::Respawn));
        info!("{name} respawned");
    }
}
