//! Math utilities and types
//!
//! Provides the 2D vector type used throughout the physics kernel.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Tolerance below which distances are treated as zero
pub const EPSILON: f32 = 1.0e-6;

/// Unit vector along +X
pub fn unit_x() -> Vec2 {
    Vec2::new(1.0, 0.0)
}

/// Sign of `value` with zero mapped to +1
///
/// Used where a direction must be picked even for a zero delta.
pub fn sign_or_positive(value: f32) -> f32 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Clamp each component of `point` into `[min, max]`
pub fn clamp_components(point: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(point.x.clamp(min.x, max.x), point.y.clamp(min.y, max.y))
}
