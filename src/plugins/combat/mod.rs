//! Damage capability.
//!
//! Anything the simulation can hurt implements `Damageable` on one of its
//! components. Hurting is requested with a `DamageRequest` message addressed to
//! an entity; one `apply_damage::<T>` consumer per damageable type resolves it.
//! Producers never read another entity's health.

use bevy::ecs::component::Mutable;
use bevy::prelude::*;

use crate::plugins::presentation::{ParticleCue, PresentationCue, SoundId};

pub trait Damageable {
    const HIT_SOUND: SoundId;
    const HIT_PARTICLE: ParticleCue;

    fn current_health(&self) -> i32;

    /// Apply `amount` of damage. Returns `false` when the hit was refused
    /// (already dead or broken).
    fn damage(&mut self, amount: i32) -> bool;
}

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct DamageRequest {
    pub target: Entity,
    pub amount: i32,
    pub source: Option<Entity>,
}

/// Resolve damage requests addressed to entities carrying `T`.
///
/// Requests for other entity types are skipped; their own consumer handles them.
pub fn apply_damage<T>(
    mut requests: MessageReader<DamageRequest>,
    mut q: Query<&mut T>,
    mut cues: MessageWriter<PresentationCue>,
) where
    T: Component<Mutability = Mutable> + Damageable,
{
    for req in requests.read() {
        let Ok(mut target) = q.get_mut(req.target) else {
            continue;
        };
        if target.damage(req.amount) {
            cues.write(PresentationCue::sound(req.target, T::HIT_SOUND));
            cues.write(PresentationCue::particle(req.target, T::HIT_PARTICLE));
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_message::<DamageRequest>();
}
