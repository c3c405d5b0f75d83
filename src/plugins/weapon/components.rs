use bevy::prelude::*;

use crate::common::tunables::WeaponTunables;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReloadState {
    Idle,
    Reloading { completes_at: f32 },
}

/// Magazine, reserve and fire timing of one gun.
///
/// Rounds only move between magazine and reserve, or leave the magazine when
/// fired. `reset` is the one place rounds are created.
#[derive(Component, Debug, Clone)]
pub struct Weapon {
    pub current_ammo: u32,
    pub current_reserve: u32,
    pub max_ammo: u32,
    pub max_reserve: u32,
    /// Shots per second.
    pub fire_rate: f32,
    pub reload_duration: f32,
    /// Sim time before which the gun refuses to fire.
    pub next_fire_time: f32,
    pub reload: ReloadState,
}

impl Weapon {
    pub fn from_tunables(t: &WeaponTunables) -> Self {
        Self {
            current_ammo: t.max_ammo,
            current_reserve: t.max_reserve,
            max_ammo: t.max_ammo,
            max_reserve: t.max_reserve,
            fire_rate: t.fire_rate,
            reload_duration: t.reload_duration,
            next_fire_time: 0.0,
            reload: ReloadState::Idle,
        }
    }

    #[inline]
    pub fn is_reloading(&self) -> bool {
        matches!(self.reload, ReloadState::Reloading { .. })
    }

    #[inline]
    pub fn total_rounds(&self) -> u32 {
        self.current_ammo + self.current_reserve
    }

    pub fn can_fire(&self, now: f32) -> bool {
        self.current_ammo > 0 && !self.is_reloading() && now >= self.next_fire_time
    }

    /// Spend one round. Refused while empty, reloading or cooling down.
    pub fn try_fire(&mut self, now: f32) -> bool {
        if !self.can_fire(now) {
            return false;
        }
        self.current_ammo -= 1;
        self.next_fire_time = now + 1.0 / self.fire_rate;
        true
    }

    /// Refused while already reloading or with a full magazine.
    pub fn begin_reload(&mut self, now: f32) -> bool {
        if self.is_reloading() || self.current_ammo >= self.max_ammo {
            return false;
        }
        self.reload = ReloadState::Reloading { completes_at: now + self.reload_duration };
        true
    }

    /// Move rounds from reserve into the magazine once the reload time passed.
    pub fn finish_reload_if_due(&mut self, now: f32) -> bool {
        let ReloadState::Reloading { completes_at } = self.reload else {
            return false;
        };
        if now < completes_at {
            return false;
        }
        let moved = self.current_reserve.min(self.max_ammo - self.current_ammo);
        self.current_ammo += moved;
        self.current_reserve -= moved;
        self.reload = ReloadState::Idle;
        true
    }

    /// Refill both pools and drop any reload or cooldown in progress.
    pub fn reset(&mut self) {
        self.current_ammo = self.max_ammo;
        self.current_reserve = self.max_reserve;
        self.reload = ReloadState::Idle;
        self.next_fire_time = 0.0;
    }

    pub fn delay_fire_until(&mut self, at: f32) {
        self.next_fire_time = self.next_fire_time.max(at);
    }
}
