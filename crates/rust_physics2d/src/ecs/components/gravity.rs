//! Gravity and force bookkeeping components

use crate::ecs::Component;
use crate::foundation::math::Vec2;

/// Opt-in to the global gravity of the physics step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityComponent {
    /// Scale applied to global gravity (0 disables, negative inverts)
    pub multiplier: f32,

    /// Disabled components are skipped entirely
    pub enabled: bool,
}

impl Component for GravityComponent {}

impl GravityComponent {
    /// Gravity with the given multiplier
    pub fn new(multiplier: f32) -> Self {
        Self {
            multiplier,
            enabled: true,
        }
    }

    /// Enable or disable gravity for this entity
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl Default for GravityComponent {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Per-frame force record used by debug visualization
///
/// Forces are collected in `accumulated` during a step, then moved to
/// `last_applied` once per frame before integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceAccumulatorComponent {
    /// Forces added since the last bookkeeping pass
    pub accumulated: Vec2,

    /// Forces of the previous pass, kept for drawing
    pub last_applied: Vec2,
}

impl Component for ForceAccumulatorComponent {}

impl ForceAccumulatorComponent {
    /// Empty accumulator
    pub fn new() -> Self {
        Self {
            accumulated: Vec2::zeros(),
            last_applied: Vec2::zeros(),
        }
    }

    /// Record a force for this frame
    pub fn add_force(&mut self, force: Vec2) {
        self.accumulated += force;
    }

    /// Move this frame's forces into `last_applied` and reset
    pub fn flush(&mut self) {
        self.last_applied = self.accumulated;
        self.accumulated = Vec2::zeros();
    }
}

impl Default for ForceAccumulatorComponent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_moves_and_clears() {
        let mut forces = ForceAccumulatorComponent::new();
        forces.add_force(Vec2::new(1.0, 2.0));
        forces.add_force(Vec2::new(0.5, 0.0));
        forces.flush();
        assert_eq!(forces.last_applied, Vec2::new(1.5, 2.0));
        assert_eq!(forces.accumulated, Vec2::zeros());
    }
}
