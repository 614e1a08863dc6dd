//! Collision manifold

use crate::foundation::math::Vec2;

/// Geometric result of a narrow-phase test between shapes A and B
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionManifold {
    /// Whether the shapes overlap or touch
    pub has_collision: bool,
    /// Unit vector pointing from A toward B
    pub normal: Vec2,
    /// Overlap along `normal` (never negative)
    pub penetration_depth: f32,
    /// Contact points in world space
    pub contact_points: Vec<Vec2>,
}

impl CollisionManifold {
    /// Manifold for a pair that does not touch
    pub fn none() -> Self {
        Self {
            has_collision: false,
            normal: Vec2::zeros(),
            penetration_depth: 0.0,
            contact_points: Vec::new(),
        }
    }

    /// Manifold for a touching pair with a single contact point
    pub fn single(normal: Vec2, penetration_depth: f32, contact: Vec2) -> Self {
        Self {
            has_collision: true,
            normal,
            penetration_depth: penetration_depth.max(0.0),
            contact_points: vec![contact],
        }
    }

    /// Same contact seen from the other shape's side
    pub fn flipped(mut self) -> Self {
        self.normal = -self.normal;
        self
    }
}

impl Default for CollisionManifold {
    fn default() -> Self {
        Self::none()
    }
}
