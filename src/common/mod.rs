//! Common, shared types.

pub mod despawn;
pub mod error;
pub mod layers;
pub mod schedule;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
