//! Configuration system
//!
//! [`Config`] gives any serde type TOML and RON file support, picked by file
//! extension. [`PhysicsConfig`] holds every tunable of the physics step.

pub use serde::{Deserialize, Serialize};

use crate::error::PhysicsError;
use crate::foundation::math::Vec2;
use crate::spatial::{QuadtreeConfig, AABB};
use std::path::Path;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => {
                toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            ConfigFormat::Ron => {
                ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Supported config file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Ron,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// What happens to a body whose position leaves the world bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfBoundsPolicy {
    /// Clamp the position componentwise into the bounds
    #[default]
    Clamp,
    /// Reappear on the opposite side
    Wrap,
    /// Clamp and reflect the velocity component that carried it out
    Bounce,
    /// Destroy the entity
    Despawn,
}

/// Physics step configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Global gravity acceleration (screen coordinates, +Y down)
    pub gravity: Vec2,

    /// Center of the simulated world
    pub world_center: Vec2,

    /// Full width and height of the simulated world
    pub world_size: Vec2,

    /// Broad-phase subdivision settings
    pub quadtree: QuadtreeConfig,

    /// Share of the penetration removed per step by positional correction
    pub correction_percent: f32,

    /// Restitution of a body that carries no material component
    pub default_restitution: f32,

    /// Handling of bodies outside the world bounds
    pub out_of_bounds: OutOfBoundsPolicy,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 9.81),
            world_center: Vec2::zeros(),
            world_size: Vec2::new(10_000.0, 10_000.0),
            quadtree: QuadtreeConfig::default(),
            correction_percent: 0.8,
            default_restitution: crate::ecs::components::DEFAULT_RESTITUTION,
            out_of_bounds: OutOfBoundsPolicy::Clamp,
        }
    }
}

impl Config for PhysicsConfig {}

impl PhysicsConfig {
    /// Load a config file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PhysicsError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Builder pattern: Set gravity
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    /// Builder pattern: Set world bounds
    pub fn with_world_bounds(mut self, center: Vec2, size: Vec2) -> Self {
        self.world_center = center;
        self.world_size = size;
        self
    }

    /// Builder pattern: Set quadtree settings
    pub fn with_quadtree(mut self, quadtree: QuadtreeConfig) -> Self {
        self.quadtree = quadtree;
        self
    }

    /// Builder pattern: Set out-of-bounds policy
    pub fn with_out_of_bounds(mut self, policy: OutOfBoundsPolicy) -> Self {
        self.out_of_bounds = policy;
        self
    }

    /// World bounds as a box
    pub fn world_bounds(&self) -> AABB {
        AABB::from_center_size(self.world_center, self.world_size)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), PhysicsError> {
        validate_world_bounds(self.world_center, self.world_size)?;

        if !self.gravity.iter().all(|c| c.is_finite()) {
            return Err(PhysicsError::InvalidGravity(self.gravity));
        }

        if self.quadtree.capacity == 0 {
            return Err(PhysicsError::InvalidQuadtreeConfig(
                "capacity must be at least 1".to_string(),
            ));
        }

        if self.quadtree.max_depth > 16 {
            log::warn!(
                "Quadtree max depth {} is unusually deep for a per-frame rebuild",
                self.quadtree.max_depth
            );
        }

        if !(self.correction_percent > 0.0 && self.correction_percent <= 1.0) {
            return Err(PhysicsError::InvalidCorrectionPercent(self.correction_percent));
        }

        if !(0.0..=1.0).contains(&self.default_restitution) {
            return Err(PhysicsError::InvalidRestitution(self.default_restitution));
        }

        Ok(())
    }
}

/// Check that world bounds have a positive, finite size
pub(crate) fn validate_world_bounds(center: Vec2, size: Vec2) -> Result<(), PhysicsError> {
    let finite = center.iter().chain(size.iter()).all(|c| c.is_finite());
    if !finite || size.x <= 0.0 || size.y <= 0.0 {
        return Err(PhysicsError::InvalidWorldBounds { center, size });
    }
    Ok(())
}
