use bevy::prelude::*;

use crate::plugins::combat::Damageable;
use crate::plugins::presentation::{ParticleCue, SoundId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PickupState {
    Free,
    Held { by: Entity },
    /// Terminal. Removed once `remove_at` passes.
    Destroyed { remove_at: f32 },
}

/// A throwable object.
///
/// Lifecycle: spawned (grounded) -> held by exactly one actor -> thrown (airborne
/// until it touches ground) -> optionally detonated on the first actor that is not
/// its last owner.
#[derive(Component, Debug, Clone)]
pub struct Pickup {
    pub state: PickupState,
    pub grounded: bool,
    /// Fresh pickups count as grounded until someone picks them up.
    pub ever_held: bool,
    /// Identity of the last actor that held this pickup. Not an owning handle.
    pub last_owner: Option<Entity>,
}

impl Pickup {
    pub fn fresh() -> Self {
        Self { state: PickupState::Free, grounded: true, ever_held: false, last_owner: None }
    }

    #[inline]
    pub fn is_picked_up(&self) -> bool {
        matches!(self.state, PickupState::Held { .. })
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        matches!(self.state, PickupState::Destroyed { .. })
    }

    #[inline]
    pub fn can_be_picked_up(&self) -> bool {
        self.state == PickupState::Free && self.grounded
    }

    /// Claim the pickup for `actor`. Check and claim happen together, so a second
    /// actor scanning the same tick sees it as taken.
    pub fn try_pick_up(&mut self, actor: Entity) -> bool {
        if !self.can_be_picked_up() {
            return false;
        }
        self.state = PickupState::Held { by: actor };
        self.grounded = false;
        self.ever_held = true;
        self.last_owner = Some(actor);
        true
    }

    /// Hand the pickup back to free motion. It is airborne until it lands.
    pub fn release(&mut self) -> bool {
        if !self.is_picked_up() {
            return false;
        }
        self.state = PickupState::Free;
        self.grounded = false;
        true
    }

    pub fn on_ground_contact(&mut self) {
        if self.state == PickupState::Free && self.ever_held {
            self.grounded = true;
        }
    }

    /// The actor this pickup would detonate on, if any.
    ///
    /// Only free pickups with a last owner are dangerous, and only the last owner
    /// is exempt. First match wins.
    pub fn detonation_target(&self, nearby: &[Entity]) -> Option<Entity> {
        if self.state != PickupState::Free {
            return None;
        }
        let owner = self.last_owner?;
        nearby.iter().copied().find(|&e| e != owner)
    }

    pub fn destroy(&mut self, remove_at: f32) -> bool {
        if self.is_destroyed() {
            return false;
        }
        self.state = PickupState::Destroyed { remove_at };
        self.grounded = false;
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CrateState {
    Intact,
    Broken { remove_at: f32 },
}

/// Breakable box that drops a pickup.
#[derive(Component, Debug, Clone)]
pub struct Crate {
    pub health: i32,
    pub max_health: i32,
    pub state: CrateState,
}

impl Crate {
    pub fn new(max_health: i32) -> Self {
        Self { health: max_health, max_health, state: CrateState::Intact }
    }

    #[inline]
    pub fn should_break(&self) -> bool {
        self.state == CrateState::Intact && self.health <= 0
    }

    pub fn break_open(&mut self, remove_at: f32) -> bool {
        if !self.should_break() {
            return false;
        }
        self.health = 0;
        self.state = CrateState::Broken { remove_at };
        true
    }
}

impl Damageable for Crate {
    const HIT_SOUND: SoundId = SoundId::CrateHit;
    const HIT_PARTICLE: ParticleCue = ParticleCue::CrateHit;

    fn current_health(&self) -> i32 {
        self.health
    }

    fn damage(&mut self, amount: i32) -> bool {
        if self.state != CrateState::Intact {
            return false;
        }
        self.health = (self.health - amount.max(0)).max(0);
        true
    }
}

/// Drops a fresh crate on a fixed interval unless junk is in the way.
#[derive(Component, Debug, Clone)]
pub struct CrateSpawner {
    pub interval: f32,
    pub next_spawn_at: f32,
}

impl CrateSpawner {
    pub fn new(interval: f32, now: f32) -> Self {
        Self { interval, next_spawn_at: now + interval }
    }

    /// Whether a crate drops now. A locked spawner waits and drops as soon as it
    /// is clear; the next drop is then a full interval away.
    pub fn poll(&mut self, now: f32, locked: bool) -> bool {
        if locked || now < self.next_spawn_at {
            return false;
        }
        self.next_spawn_at = now + self.interval;
        true
    }
}
