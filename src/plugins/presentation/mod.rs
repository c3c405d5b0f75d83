//! Presentation sink.
//!
//! The simulation only *emits* cues. Sounds, particles and animation states are
//! fire-and-forget messages; nothing here feeds back into gameplay state. Playback
//! itself lives outside this crate, so the sink drains and logs them.

use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundId {
    Jump,
    Land,
    Hit,
    Death,
    Respawn,
    Shoot,
    Draw,
    Holster,
    ReloadStart,
    ReloadFinish,
    Explosion,
    CrateHit,
    CrateBreak,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleCue {
    MuzzleFlash,
    Hit,
    Death,
    Explosion,
    CrateHit,
    CrateBreak,
}

/// Animator layers, in the order the character animator stacks them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyPart {
    Body,
    Arms,
    Legs,
}

impl BodyPart {
    pub const ALL: [BodyPart; 3] = [BodyPart::Body, BodyPart::Arms, BodyPart::Legs];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimState {
    Idle,
    Move,
    Jump,
    Hold,
    GunHold,
}

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub enum PresentationCue {
    Sound { source: Entity, sound: SoundId },
    Particle { source: Entity, effect: ParticleCue },
    Animation { source: Entity, part: BodyPart, state: AnimState },
}

impl PresentationCue {
    #[inline]
    pub fn sound(source: Entity, sound: SoundId) -> Self {
        Self::Sound { source, sound }
    }

    #[inline]
    pub fn particle(source: Entity, effect: ParticleCue) -> Self {
        Self::Particle { source, effect }
    }
}

pub fn plugin(app: &mut App) {
    app.add_message::<PresentationCue>()
        .add_systems(PostUpdate, drain_cues);
}

fn drain_cues(mut reader: MessageReader<PresentationCue>) {
    for cue in reader.read() {
        debug!("cue {cue:?}");
    }
}
