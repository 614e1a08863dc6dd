//! Error types
//!
//! Only configuration can fail. Degenerate geometry and missing components
//! during a physics step are handled in place and never surface here.

use crate::config::ConfigError;
use crate::foundation::math::Vec2;

/// Errors produced when configuring the physics kernel
#[derive(thiserror::Error, Debug)]
pub enum PhysicsError {
    /// World bounds must have a positive, finite size
    #[error("Invalid world bounds: center {center:?}, size {size:?}")]
    InvalidWorldBounds {
        /// Requested center
        center: Vec2,
        /// Requested size
        size: Vec2,
    },

    /// Quadtree settings out of range
    #[error("Invalid quadtree config: {0}")]
    InvalidQuadtreeConfig(String),

    /// Positional correction percentage outside (0, 1]
    #[error("Correction percent must be in (0, 1], got {0}")]
    InvalidCorrectionPercent(f32),

    /// Restitution outside [0, 1]
    #[error("Restitution must be in [0, 1], got {0}")]
    InvalidRestitution(f32),

    /// Gravity must be finite
    #[error("Gravity must be finite, got {0:?}")]
    InvalidGravity(Vec2),

    /// Config file could not be loaded or saved
    #[error(transparent)]
    Config(#[from] ConfigError),
}
