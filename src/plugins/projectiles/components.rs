use bevy::prelude::*;

use crate::common::tunables::ProjectileTunables;

use super::SpawnProjectile;

/// How a projectile ended. Reached exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    TimedOut,
    Hit(Entity),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileState {
    InFlight,
    Spent(Termination),
}

/// Straight-line shot from `origin` toward `target`.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub origin: Vec2,
    pub target: Vec2,
    pub caster: Option<Entity>,
    /// Seconds in flight.
    pub lifetime: f32,
    pub kill_time: f32,
    pub speed: f32,
    pub damage: i32,
    pub hit_radius: f32,
    pub state: ProjectileState,
}

impl Projectile {
    pub fn new(req: &SpawnProjectile, t: &ProjectileTunables) -> Self {
        Self {
            origin: req.origin,
            target: req.target,
            caster: req.caster,
            lifetime: 0.0,
            kill_time: t.kill_time,
            speed: t.speed,
            damage: t.damage,
            hit_radius: t.hit_radius,
            state: ProjectileState::InFlight,
        }
    }

    /// Constant velocity along the aim line. Zero if the target is the origin.
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        (self.target - self.origin).normalize_or_zero() * self.speed
    }

    #[inline]
    pub fn is_spent(&self) -> bool {
        matches!(self.state, ProjectileState::Spent(_))
    }
}
