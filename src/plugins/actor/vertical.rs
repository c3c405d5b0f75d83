//! Jump and phase state machine.
//!
//! Each fixed tick an actor samples the ground under its feet, then:
//! 1. lands (zeroing vertical motion) or falls under gravity,
//! 2. charges or commits a jump,
//! 3. starts a downward phase when asked,
//! 4. moves the phase state along.
//!
//! While phasing (and allowed to) the actor's collider ignores every platform in
//! the level's phase registry. Unregistered ground always stays solid.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::{actor_layers, ground_probe_mask, Layer};
use crate::common::tunables::{ActorTunables, JumpMode, Tunables};
use crate::plugins::level::LevelPhaseRegistry;
use crate::plugins::physics::CollisionQueries;
use crate::plugins::presentation::{PresentationCue, SoundId};

use super::components::{Actor, JumpState, Locomotion, PhaseState, Vitals};
use super::input::ActorCommand;

/// What the probes found around one actor this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GroundSample {
    /// Something the actor currently collides with is under its feet.
    pub grounded: bool,
    /// Some of that ground is not in the phase registry.
    pub on_unphaseable: bool,
    /// The feet probe touches a registered platform.
    pub feet_on_phaseable: bool,
    /// The body overlaps a registered platform.
    pub body_in_phaseable: bool,
}

pub fn sample_ground(
    queries: &impl CollisionQueries,
    registry: &LevelPhaseRegistry,
    body: Vec2,
    ignore_platforms: bool,
    t: &ActorTunables,
) -> GroundSample {
    let feet = body - Vec2::Y * t.ground_check_offset;
    let under = queries.overlap_circle(feet, t.ground_scan_radius, ground_probe_mask());

    let grounded = under
        .iter()
        .any(|&e| !(ignore_platforms && registry.contains(e)));
    let on_unphaseable = under.iter().any(|&e| !registry.contains(e));
    let feet_on_phaseable = under.iter().any(|&e| registry.contains(e));
    let body_in_phaseable = queries
        .overlap_circle(body, t.body_radius, Layer::Platform.into())
        .into_iter()
        .any(|e| registry.contains(e));

    GroundSample { grounded, on_unphaseable, feet_on_phaseable, body_in_phaseable }
}

/// Transitions that produced a cue this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VerticalEvents {
    pub landed: bool,
    pub jumped: bool,
    pub dropped: bool,
}

/// Advance the jump multiplier. Returns the multiplier to jump with when the
/// jump commits this tick.
fn jump_commit(loco: &mut Locomotion, cmd: &ActorCommand, t: &ActorTunables) -> Option<f32> {
    if !loco.grounded {
        return None;
    }
    let max = t.max_jump_multiplier;
    match t.jump_mode {
        JumpMode::Instant => {
            (cmd.jump_pressed && loco.jump == JumpState::Ready).then_some(max)
        }
        JumpMode::Charged => match loco.jump {
            JumpState::Ready if cmd.jump_held => charge(loco, 0.0, t),
            JumpState::Charging { multiplier } if cmd.jump_held => charge(loco, multiplier, t),
            // Released before the cap.
            JumpState::Charging { multiplier } if multiplier > 0.0 => Some(multiplier.min(max)),
            _ => None,
        },
    }
}

fn charge(loco: &mut Locomotion, from: f32, t: &ActorTunables) -> Option<f32> {
    let multiplier = from + t.jump_hold_increment;
    if multiplier >= t.max_jump_multiplier {
        return Some(t.max_jump_multiplier);
    }
    loco.jump = JumpState::Charging { multiplier };
    None
}

fn update_phase(loco: &mut Locomotion, ground: &GroundSample, events: &VerticalEvents, dead_zone: f32) {
    let y = loco.y_velocity;
    // A drop started this tick may begin with a landing; only a later one ends it.
    let landed = events.landed && !events.dropped;
    loco.phase = match loco.phase {
        PhaseState::Solid if y > dead_zone => PhaseState::Rising,
        PhaseState::Rising if y <= dead_zone && !ground.body_in_phaseable => PhaseState::Solid,
        PhaseState::Dropping
            if y > dead_zone
                || landed
                || !(ground.body_in_phaseable || ground.feet_on_phaseable) =>
        {
            PhaseState::Solid
        }
        unchanged => unchanged,
    };
}

/// One vertical step for a living actor.
pub fn step_vertical(
    loco: &mut Locomotion,
    cmd: &ActorCommand,
    ground: &GroundSample,
    t: &ActorTunables,
    dt: f32,
) -> VerticalEvents {
    let mut events = VerticalEvents::default();

    loco.grounded = ground.grounded;
    if loco.grounded {
        if loco.y_velocity < 0.0 {
            loco.y_velocity = 0.0;
            loco.x_velocity = 0.0;
            loco.jump = JumpState::Ready;
            // Standing on anything unregistered forbids phasing until the next jump.
            loco.can_phase = !ground.on_unphaseable;
            events.landed = true;
        }
    } else {
        loco.y_velocity += t.gravity * dt;
    }

    if let Some(multiplier) = jump_commit(loco, cmd, t) {
        loco.y_velocity = t.jump_distribution * t.jump_height * multiplier;
        loco.x_velocity = (1.0 - t.jump_distribution) * t.jump_height * multiplier;
        loco.jump = JumpState::Spent;
        loco.can_phase = true;
        events.jumped = true;
    }

    if cmd.phase_down_pressed
        && loco.grounded
        && loco.can_phase
        && loco.phase == PhaseState::Solid
        && !events.jumped
    {
        loco.y_velocity = t.downward_phase_velocity;
        loco.phase = PhaseState::Dropping;
        events.dropped = true;
    }

    update_phase(loco, ground, &events, t.phase_dead_zone);
    events
}

pub(super) fn update_vertical(
    time: Res<Time>,
    tunables: Res<Tunables>,
    registry: Res<LevelPhaseRegistry>,
    spatial: SpatialQuery,
    mut q: Query<
        (
            Entity,
            &Transform,
            &Vitals,
            &ActorCommand,
            &mut Locomotion,
            &mut LinearVelocity,
            &mut CollisionLayers,
        ),
        With<Actor>,
    >,
    mut cues: MessageWriter<PresentationCue>,
) {
    let t = &tunables.actor;
    let dt = time.delta_secs();

    for (e, tf, vitals, cmd, mut loco, mut vel, mut layers) in &mut q {
        if vitals.is_dead() {
            continue;
        }
        let sample = sample_ground(
            &spatial,
            &registry,
            tf.translation.truncate(),
            loco.ignores_platforms(),
            t,
        );
        let events = step_vertical(&mut loco, cmd, &sample, t, dt);

        vel.x += loco.axis * loco.x_velocity;
        vel.y = loco.y_velocity;

        let wanted = actor_layers(loco.ignores_platforms());
        if *layers != wanted {
            *layers = wanted;
        }

        if events.jumped {
            cues.write(PresentationCue::sound(e, SoundId::Jump));
        }
        if events.landed {
            cues.write(PresentationCue::sound(e, SoundId::Land));
        }
    }
}
