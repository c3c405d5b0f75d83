//! Tunable gameplay constants.
//!
//! One immutable resource, grouped by the subsystem that reads it. Distances are in
//! pixels, times in seconds, velocities in pixels per second.

use bevy::prelude::*;

use super::error::ConfigError;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    /// Gravity for free bodies (pickups). Actors integrate their own.
    pub world_gravity: Vec2,
    pub actor: ActorTunables,
    pub weapon: WeaponTunables,
    pub projectile: ProjectileTunables,
    pub pickup: PickupTunables,
    pub crate_box: CrateTunables,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            world_gravity: Vec2::new(0.0, -1600.0),
            actor: ActorTunables::default(),
            weapon: WeaponTunables::default(),
            projectile: ProjectileTunables::default(),
            pickup: PickupTunables::default(),
            crate_box: CrateTunables::default(),
        }
    }
}

/// Which jump variant actors use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpMode {
    /// Holding jump accumulates a multiplier; release or cap commits.
    #[default]
    Charged,
    /// Pressing jump commits immediately at the maximum multiplier.
    Instant,
}

#[derive(Debug, Clone)]
pub struct ActorTunables {
    pub max_health: i32,
    pub movement_speed: f32,
    pub jump_mode: JumpMode,
    pub jump_height: f32,
    /// Share of the jump impulse going up; the rest boosts horizontal motion.
    pub jump_distribution: f32,
    /// Multiplier gained per fixed tick while jump is held.
    pub jump_hold_increment: f32,
    pub max_jump_multiplier: f32,
    /// Vertical acceleration while airborne (negative is down).
    pub gravity: f32,
    pub body_radius: f32,
    pub ground_scan_radius: f32,
    /// Distance from the body centre down to the ground probe.
    pub ground_check_offset: f32,
    pub item_scan_radius: f32,
    pub throw_force: f32,
    pub throw_torque: f32,
    /// Share of the throw going up; the rest goes forward.
    pub up_throw_distribution: f32,
    /// Exponential facing-smoothing rate (1/s).
    pub facing_smooth_rate: f32,
    pub respawn_delay: f32,
    pub phase_dead_zone: f32,
    pub downward_phase_velocity: f32,
    /// Fire cooldown granted whenever the gun is drawn.
    pub draw_grace: f32,
    /// Held anchor position relative to the body when facing right.
    pub held_anchor_offset: Vec2,
    /// Holster anchor position relative to the body when facing right.
    pub holster_anchor_offset: Vec2,
    /// Muzzle position relative to the body when facing right.
    pub muzzle_offset: Vec2,
}

impl Default for ActorTunables {
    fn default() -> Self {
        Self {
            max_health: 100,
            movement_speed: 280.0,
            jump_mode: JumpMode::Charged,
            jump_height: 1100.0,
            jump_distribution: 0.8,
            jump_hold_increment: 0.05,
            max_jump_multiplier: 1.0,
            gravity: -2200.0,
            body_radius: 13.0,
            ground_scan_radius: 5.0,
            ground_check_offset: 13.0,
            item_scan_radius: 24.0,
            throw_force: 700.0,
            throw_torque: 6.0,
            up_throw_distribution: 0.35,
            facing_smooth_rate: 12.0,
            respawn_delay: 3.0,
            phase_dead_zone: 20.0,
            downward_phase_velocity: -180.0,
            draw_grace: 0.5,
            held_anchor_offset: Vec2::new(16.0, 4.0),
            holster_anchor_offset: Vec2::new(-10.0, 2.0),
            muzzle_offset: Vec2::new(24.0, 4.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeaponTunables {
    pub max_ammo: u32,
    pub max_reserve: u32,
    /// Shots per second.
    pub fire_rate: f32,
    /// Half-angle of the bloom cone, in degrees.
    pub bloom_degrees: f32,
    pub reload_duration: f32,
    pub max_shoot_distance: f32,
    /// Aim distance used when the ray hits nothing.
    pub miss_distance: f32,
}

impl Default for WeaponTunables {
    fn default() -> Self {
        Self {
            max_ammo: 12,
            max_reserve: 36,
            fire_rate: 6.0,
            bloom_degrees: 3.0,
            reload_duration: 1.2,
            max_shoot_distance: 1500.0,
            miss_distance: 750.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectileTunables {
    pub speed: f32,
    pub hit_radius: f32,
    pub kill_time: f32,
    pub damage: i32,
}

impl Default for ProjectileTunables {
    fn default() -> Self {
        Self { speed: 1400.0, hit_radius: 6.0, kill_time: 1.5, damage: 10 }
    }
}

#[derive(Debug, Clone)]
pub struct PickupTunables {
    pub size: f32,
    pub mass: f32,
    pub angular_inertia: f32,
    pub hit_radius: f32,
    pub damage: i32,
    /// Delay between detonation and removal.
    pub destroy_delay: f32,
    pub ground_scale: f32,
    pub hands_scale: f32,
}

impl Default for PickupTunables {
    fn default() -> Self {
        Self {
            size: 18.0,
            mass: 2.0,
            angular_inertia: 0.5,
            hit_radius: 20.0,
            damage: 35,
            destroy_delay: 1.5,
            ground_scale: 1.0,
            hands_scale: 0.75,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CrateTunables {
    pub size: f32,
    pub mass: f32,
    pub max_health: i32,
    pub destroy_delay: f32,
    /// Seconds between drops from one spawner.
    pub spawn_interval: f32,
    /// Height above the spawner a new crate is dropped from.
    pub spawn_height: f32,
    /// A spawner with a crate or pickup inside this radius stays locked.
    pub junk_radius: f32,
}

impl Default for CrateTunables {
    fn default() -> Self {
        Self {
            size: 34.0,
            mass: 6.0,
            max_health: 30,
            destroy_delay: 1.0,
            spawn_interval: 12.0,
            spawn_height: 140.0,
            junk_radius: 20.0,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 { Ok(()) } else { Err(ConfigError::NotPositive { field, value }) }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 { Ok(()) } else { Err(ConfigError::Negative { field, value }) }
}

fn unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) { Ok(()) } else { Err(ConfigError::NotUnit { field, value }) }
}

impl Tunables {
    /// Check every parameter set once, before the simulation starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("pixels_per_meter", self.pixels_per_meter)?;

        let a = &self.actor;
        positive("actor.max_health", a.max_health as f32)?;
        positive("actor.movement_speed", a.movement_speed)?;
        non_negative("actor.jump_height", a.jump_height)?;
        unit("actor.jump_distribution", a.jump_distribution)?;
        positive("actor.jump_hold_increment", a.jump_hold_increment)?;
        positive("actor.max_jump_multiplier", a.max_jump_multiplier)?;
        if a.gravity >= 0.0 {
            return Err(ConfigError::UpwardGravity(a.gravity));
        }
        positive("actor.body_radius", a.body_radius)?;
        positive("actor.ground_scan_radius", a.ground_scan_radius)?;
        positive("actor.item_scan_radius", a.item_scan_radius)?;
        non_negative("actor.throw_force", a.throw_force)?;
        unit("actor.up_throw_distribution", a.up_throw_distribution)?;
        positive("actor.facing_smooth_rate", a.facing_smooth_rate)?;
        non_negative("actor.respawn_delay", a.respawn_delay)?;
        non_negative("actor.phase_dead_zone", a.phase_dead_zone)?;
        if a.downward_phase_velocity >= 0.0 {
            return Err(ConfigError::UpwardPhaseVelocity(a.downward_phase_velocity));
        }
        non_negative("actor.draw_grace", a.draw_grace)?;

        let w = &self.weapon;
        if w.max_ammo == 0 {
            return Err(ConfigError::EmptyMagazine);
        }
        positive("weapon.fire_rate", w.fire_rate)?;
        non_negative("weapon.bloom_degrees", w.bloom_degrees)?;
        non_negative("weapon.reload_duration", w.reload_duration)?;
        positive("weapon.max_shoot_distance", w.max_shoot_distance)?;
        positive("weapon.miss_distance", w.miss_distance)?;

        let p = &self.projectile;
        positive("projectile.speed", p.speed)?;
        positive("projectile.hit_radius", p.hit_radius)?;
        positive("projectile.kill_time", p.kill_time)?;
        non_negative("projectile.damage", p.damage as f32)?;

        let k = &self.pickup;
        positive("pickup.mass", k.mass)?;
        positive("pickup.angular_inertia", k.angular_inertia)?;
        positive("pickup.hit_radius", k.hit_radius)?;
        non_negative("pickup.damage", k.damage as f32)?;
        non_negative("pickup.destroy_delay", k.destroy_delay)?;

        let c = &self.crate_box;
        positive("crate.mass", c.mass)?;
        positive("crate.max_health", c.max_health as f32)?;
        non_negative("crate.destroy_delay", c.destroy_delay)?;
        positive("crate.spawn_interval", c.spawn_interval)?;
        positive("crate.junk_radius", c.junk_radius)?;
        Ok(())
    }
}
