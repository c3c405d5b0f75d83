use bevy::prelude::*;

/// Player-controlled actor (body entity).
#[derive(Component, Debug, Clone, Copy)]
pub struct Actor;

/// Child entity that carries the visible model and is turned to face.
#[derive(Component, Debug, Clone, Copy)]
pub struct ActorModel;

/// Child entities the actor mounts items on.
#[derive(Component, Debug, Clone, Copy)]
pub struct ActorRig {
    pub model: Entity,
    pub held_anchor: Entity,
    pub holster_anchor: Entity,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LifeState {
    Alive,
    Dead { respawn_at: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathCause {
    /// Health ran out.
    Depleted,
    /// Fell below the level's kill height.
    OffMap,
}

/// Health and the alive/dead state machine.
///
/// `current_health` stays in `0..=max_health`; damage saturates at zero.
#[derive(Component, Debug, Clone)]
pub struct Vitals {
    pub current_health: i32,
    pub max_health: i32,
    pub life: LifeState,
}

impl Vitals {
    pub fn new(max_health: i32) -> Self {
        Self { current_health: max_health, max_health, life: LifeState::Alive }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        matches!(self.life, LifeState::Dead { .. })
    }

    /// Why this actor should die this tick, if it should.
    pub fn death_cause(&self, height: f32, kill_y: f32) -> Option<DeathCause> {
        if self.is_dead() {
            None
        } else if self.current_health <= 0 {
            Some(DeathCause::Depleted)
        } else if height < kill_y {
            Some(DeathCause::OffMap)
        } else {
            None
        }
    }

    pub fn die(&mut self, respawn_at: f32) {
        self.current_health = 0;
        self.life = LifeState::Dead { respawn_at };
    }

    #[inline]
    pub fn respawn_due(&self, now: f32) -> bool {
        matches!(self.life, LifeState::Dead { respawn_at } if now >= respawn_at)
    }

    pub fn restore(&mut self) {
        self.current_health = self.max_health;
        self.life = LifeState::Alive;
    }
}

/// Jump latch. `Spent` holds until the next landing.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum JumpState {
    #[default]
    Ready,
    Charging { multiplier: f32 },
    Spent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PhaseState {
    #[default]
    Solid,
    /// Entered implicitly by rising faster than the dead zone.
    Rising,
    /// Entered by the explicit drop input while grounded.
    Dropping,
}

/// Motion, jump and phase state.
#[derive(Component, Debug, Clone, Default)]
pub struct Locomotion {
    /// Horizontal input this tick, in [-1, 1].
    pub axis: f32,
    /// Last non-zero horizontal input; decides facing.
    pub last_button_x: f32,
    /// Horizontal jump boost, scaled by the input axis.
    pub x_velocity: f32,
    pub y_velocity: f32,
    pub grounded: bool,
    pub can_phase: bool,
    pub phase: PhaseState,
    pub jump: JumpState,
}

impl Locomotion {
    #[inline]
    pub fn is_phasing(&self) -> bool {
        self.phase != PhaseState::Solid
    }

    /// Whether the collider ignores every registered phaseable platform.
    #[inline]
    pub fn ignores_platforms(&self) -> bool {
        self.is_phasing() && self.can_phase
    }

    /// +1 facing right, -1 facing left.
    #[inline]
    pub fn facing(&self) -> f32 {
        if self.last_button_x < 0.0 { -1.0 } else { 1.0 }
    }

    /// Clear every motion, jump and phase latch. Facing survives.
    pub fn reset(&mut self) {
        *self = Self { last_button_x: self.last_button_x, ..default() };
    }
}

/// What occupies the actor's hands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hands {
    Unarmed,
    HoldingGun,
    HoldingPickup(Entity),
}

/// Equip state. The gun entity persists whether drawn or holstered.
#[derive(Component, Debug, Clone)]
pub struct Equipment {
    pub hands: Hands,
    pub gun: Option<Entity>,
    /// Throw the held pickup when this tick commits.
    pub release_requested: bool,
    /// Body position to throw from instead of the current one.
    pub release_from: Option<Vec2>,
}

impl Equipment {
    pub fn new(gun: Option<Entity>) -> Self {
        Self { hands: Hands::Unarmed, gun, release_requested: false, release_from: None }
    }

    #[inline]
    pub fn held_pickup(&self) -> Option<Entity> {
        match self.hands {
            Hands::HoldingPickup(p) => Some(p),
            _ => None,
        }
    }

    #[inline]
    pub fn is_holding_gun(&self) -> bool {
        self.hands == Hands::HoldingGun
    }
}
