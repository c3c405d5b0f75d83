//! Startup configuration errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must lie in [0, 1], got {value}")]
    NotUnit { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("gravity must pull downwards, got {0}")]
    UpwardGravity(f32),

    #[error("downward phase velocity must be negative, got {0}")]
    UpwardPhaseVelocity(f32),

    #[error("max ammo must be at least 1")]
    EmptyMagazine,
}
