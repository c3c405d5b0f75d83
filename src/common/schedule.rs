//! Fixed-step ordering.
//!
//! One simulation tick runs these sets in order. Actor stages skip dead actors
//! themselves; only the lifecycle stage looks at them.
//!
//! ```text
//! Motion -> Vertical -> Equip -> Weapon -> Hazards -> Damage -> Lifecycle -> Commit
//! ```

use bevy::prelude::*;

use super::state::GameState;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Horizontal motion and facing.
    Motion,
    /// Ground sampling, jump and phase state machine.
    Vertical,
    /// Pick up / throw requests, holster and draw.
    Equip,
    /// Fire, reload.
    Weapon,
    /// Projectiles and thrown pickups looking for victims.
    Hazards,
    /// Damage requests resolved against each damageable type.
    Damage,
    /// Death triggers, respawn timers, crate breaking and crate drops.
    Lifecycle,
    /// Deferred releases, expiry marks, input edge reset.
    Commit,
}

pub fn configure(app: &mut App) {
    app.configure_sets(
        FixedUpdate,
        (
            SimSet::Motion,
            SimSet::Vertical,
            SimSet::Equip,
            SimSet::Weapon,
            SimSet::Hazards,
            SimSet::Damage,
            SimSet::Lifecycle,
            SimSet::Commit,
        )
            .chain()
            .run_if(in_state(GameState::InGame)),
    );
}
