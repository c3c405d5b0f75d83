//! Animation triggers.
//!
//! Each body part plays one state. A trigger is emitted only when the state a
//! part should play changes, and never while the actor is dead.

use bevy::prelude::*;

use crate::plugins::presentation::{AnimState, BodyPart, PresentationCue};

use super::components::{Actor, Equipment, Hands, Locomotion, Vitals};

/// States indexed by `BodyPart::index`.
pub fn desired_states(hands: Hands, grounded: bool, axis: f32) -> [AnimState; 3] {
    let base = if !grounded {
        AnimState::Jump
    } else if axis != 0.0 {
        AnimState::Move
    } else {
        AnimState::Idle
    };
    let arms = match hands {
        Hands::HoldingGun => AnimState::GunHold,
        Hands::HoldingPickup(_) => AnimState::Hold,
        Hands::Unarmed => base,
    };
    [base, arms, base]
}

#[derive(Component, Debug, Clone, Default)]
pub struct AnimationDriver {
    current: [Option<AnimState>; 3],
}

impl AnimationDriver {
    /// Store `desired` and return the parts whose state changed.
    pub fn update(&mut self, desired: [AnimState; 3]) -> Vec<(BodyPart, AnimState)> {
        let mut changed = Vec::new();
        for part in BodyPart::ALL {
            let slot = &mut self.current[part.index()];
            if *slot != Some(desired[part.index()]) {
                *slot = Some(desired[part.index()]);
                changed.push((part, desired[part.index()]));
            }
        }
        changed
    }
}

pub(super) fn drive_animations(
    mut q: Query<(Entity, &Vitals, &Locomotion, &Equipment, &mut AnimationDriver), With<Actor>>,
    mut cues: MessageWriter<PresentationCue>,
) {
    for (e, vitals, loco, equip, mut driver) in &mut q {
        if vitals.is_dead() {
            continue;
        }
        let desired = desired_states(equip.hands, loco.grounded, loco.axis);
        for (part, state) in driver.update(desired) {
            cues.write(PresentationCue::Animation { source: e, part, state });
        }
    }
}
