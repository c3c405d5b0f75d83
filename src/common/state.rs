//! Global state machine.
//!
//! Everything the arena spawns is scoped to `InGame` with `DespawnOnExit`.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
}
