//! Phase Arena: a two-player side-scrolling arena shooter.
//!
//! Gameplay (actors, weapons, pickups, projectiles, the level) runs in fixed steps
//! and works headless; camera and lighting are layered on only in the full app.
//!
//! Integration tests in `tests/` are compiled as separate crates and import this
//! library's public API.

pub mod common;
pub mod game;
pub mod plugins;
