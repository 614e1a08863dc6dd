//! Physical material component

use crate::ecs::Component;

/// Restitution used when a body carries no material
pub const DEFAULT_RESTITUTION: f32 = 0.8;

/// Explicit restitution source for a collider's owner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsMaterialComponent {
    /// Bounciness: 0 = fully inelastic, 1 = perfectly elastic
    pub restitution: f32,
}

impl Component for PhysicsMaterialComponent {}

impl PhysicsMaterialComponent {
    /// Material with the given restitution, clamped to [0, 1]
    pub fn new(restitution: f32) -> Self {
        Self {
            restitution: restitution.clamp(0.0, 1.0),
        }
    }
}

impl Default for PhysicsMaterialComponent {
    fn default() -> Self {
        Self::new(DEFAULT_RESTITUTION)
    }
}
