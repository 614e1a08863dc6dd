//! Transform component for the ECS system
//!
//! Pure data: world-space position and linear velocity. The physics step
//! reads and writes both fields every frame.

use crate::ecs::Component;
use crate::foundation::math::Vec2;

/// ECS Transform component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformComponent {
    /// World space position (center of the attached collider)
    pub position: Vec2,

    /// Linear velocity in units per second
    pub velocity: Vec2,
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        Self::from_position(Vec2::zeros())
    }
}

impl TransformComponent {
    /// Create from position only
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::zeros(),
        }
    }

    /// Builder pattern: Set velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Semi-implicit Euler position update
    pub fn integrate(&mut self, delta_time: f32) {
        self.position += self.velocity * delta_time;
    }
}
