//! Equip state machine: gun drawn or holstered, pickups held and thrown.
//!
//! Picking up happens during the tick. Throwing only records a request; the
//! release (reparenting, impulse, redraw) is committed at the end of the tick so
//! nothing that ran earlier saw a half-released pickup.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::{free_pickup_layers, held_pickup_layers, Layer};
use crate::common::tunables::{ActorTunables, Tunables};
use crate::plugins::physics::CollisionQueries;
use crate::plugins::pickups::Pickup;
use crate::plugins::presentation::{PresentationCue, SoundId};
use crate::plugins::weapon::Weapon;

use super::components::{Actor, ActorRig, Equipment, Hands, Locomotion, Vitals};
use super::input::ActorCommand;

/// Claim the first pickup in `nearby` that accepts `actor`.
///
/// `try_claim` must check and claim in one step; that makes pickup exclusive even
/// when two actors scan the same pickup in one tick.
pub fn claim_first(nearby: &[Entity], mut try_claim: impl FnMut(Entity) -> bool) -> Option<Entity> {
    nearby.iter().copied().find(|&e| try_claim(e))
}

/// Linear and angular impulse of a throw for an actor facing `facing` (+1/-1).
pub fn throw_impulse(mass: f32, facing: f32, t: &ActorTunables) -> (Vec2, f32) {
    let up = Vec2::Y * t.up_throw_distribution;
    let forward = Vec2::X * facing * (1.0 - t.up_throw_distribution);
    (mass * t.throw_force * (up + forward), -facing * t.throw_torque)
}

/// Attach `item` to `anchor` at the anchor's origin.
pub fn mount(commands: &mut Commands, item: Entity, anchor: Entity, scale: f32) {
    commands
        .entity(item)
        .insert((ChildOf(anchor), Transform::from_scale(Vec3::splat(scale))));
}

/// Put the gun in the hands and block firing for the draw grace.
/// Without a gun the hands end up empty.
pub fn draw_gun(
    commands: &mut Commands,
    actor: Entity,
    equip: &mut Equipment,
    rig: &ActorRig,
    weapons: &mut Query<&mut Weapon>,
    ready_at: f32,
    cues: &mut MessageWriter<PresentationCue>,
) {
    let Some(gun) = equip.gun else {
        equip.hands = Hands::Unarmed;
        return;
    };
    let Ok(mut weapon) = weapons.get_mut(gun) else {
        warn!("actor {actor} lost its gun {gun}, continuing unarmed");
        equip.gun = None;
        equip.hands = Hands::Unarmed;
        return;
    };
    weapon.delay_fire_until(ready_at);
    mount(commands, gun, rig.held_anchor, 1.0);
    equip.hands = Hands::HoldingGun;
    cues.write(PresentationCue::sound(actor, SoundId::Draw));
}

pub fn holster_gun(
    commands: &mut Commands,
    actor: Entity,
    equip: &Equipment,
    rig: &ActorRig,
    cues: &mut MessageWriter<PresentationCue>,
) {
    if let Some(gun) = equip.gun {
        mount(commands, gun, rig.holster_anchor, 1.0);
        cues.write(PresentationCue::sound(actor, SoundId::Holster));
    }
}

pub(super) fn equip_pickups(
    mut commands: Commands,
    tunables: Res<Tunables>,
    spatial: SpatialQuery,
    mut q_actors: Query<
        (Entity, &Transform, &Vitals, &ActorCommand, &ActorRig, &mut Equipment),
        With<Actor>,
    >,
    mut q_pickups: Query<
        (
            &mut Pickup,
            &mut RigidBody,
            &mut LinearVelocity,
            &mut AngularVelocity,
            &mut CollisionLayers,
        ),
        Without<Actor>,
    >,
    mut cues: MessageWriter<PresentationCue>,
) {
    for (actor, tf, vitals, cmd, rig, mut equip) in &mut q_actors {
        if vitals.is_dead() {
            continue;
        }
        if equip.held_pickup().is_some() {
            if cmd.shoot_pressed {
                equip.release_requested = true;
            }
            continue;
        }

        let nearby = spatial.overlap_circle(
            tf.translation.truncate(),
            tunables.actor.item_scan_radius,
            Layer::Pickup.into(),
        );
        let claimed = claim_first(&nearby, |e| {
            q_pickups
                .get_mut(e)
                .map(|(mut pickup, ..)| pickup.try_pick_up(actor))
                .unwrap_or(false)
        });
        let Some(item) = claimed else {
            continue;
        };

        if let Ok((_, mut body, mut vel, mut ang, mut layers)) = q_pickups.get_mut(item) {
            *body = RigidBody::Kinematic;
            vel.0 = Vec2::ZERO;
            ang.0 = 0.0;
            *layers = held_pickup_layers();
        }
        if equip.is_holding_gun() {
            holster_gun(&mut commands, actor, &equip, rig, &mut cues);
        }
        mount(&mut commands, item, rig.held_anchor, tunables.pickup.hands_scale);
        equip.hands = Hands::HoldingPickup(item);
        debug!("actor {actor} picked up {item}");
    }
}

/// Throw every pickup whose release was requested this tick, then redraw the gun
/// for actors still alive.
pub(super) fn commit_pickup_releases(
    mut commands: Commands,
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut q_actors: Query<
        (Entity, &Transform, &Vitals, &Locomotion, &ActorRig, &mut Equipment),
        With<Actor>,
    >,
    mut q_pickups: Query<
        (
            &mut Pickup,
            &mut Transform,
            &mut RigidBody,
            &mut LinearVelocity,
            &mut AngularVelocity,
            &mut CollisionLayers,
            &Mass,
            &AngularInertia,
        ),
        Without<Actor>,
    >,
    mut q_weapons: Query<&mut Weapon>,
    mut cues: MessageWriter<PresentationCue>,
) {
    let now = time.elapsed_secs();
    let t = &tunables.actor;

    for (actor, tf, vitals, loco, rig, mut equip) in &mut q_actors {
        if !equip.release_requested {
            continue;
        }
        equip.release_requested = false;
        let body = equip.release_from.take().unwrap_or(tf.translation.truncate());
        let Some(item) = equip.held_pickup() else {
            continue;
        };

        if let Ok((mut pickup, mut ptf, mut body, mut vel, mut ang, mut layers, mass, inertia)) =
            q_pickups.get_mut(item)
            && pickup.release()
        {
            let facing = loco.facing();
            let held_at = body
                + Vec2::new(t.held_anchor_offset.x * facing, t.held_anchor_offset.y);
            *ptf = Transform::from_translation(held_at.extend(1.0))
                .with_scale(Vec3::splat(tunables.pickup.ground_scale));
            commands.entity(item).remove::<ChildOf>();

            *body = RigidBody::Dynamic;
            *layers = free_pickup_layers();
            let (impulse, torque) = throw_impulse(mass.0, facing, t);
            vel.0 = impulse / mass.0;
            ang.0 = torque / inertia.0;
            debug!("actor {actor} threw {item}");
        }

        // Dropped on death: the gun stays holstered until respawn.
        if vitals.is_dead() {
            equip.hands = Hands::Unarmed;
            continue;
        }
        draw_gun(
            &mut commands,
            actor,
            &mut equip,
            rig,
            &mut q_weapons,
            now + t.draw_grace,
            &mut cues,
        );
    }
}
