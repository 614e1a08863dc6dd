//! Narrow-phase collision detection
//!
//! # Module Organization
//!
//! - [`shape`] - Collider shapes (local) and their world-space form
//! - [`manifold`] - Contact data produced by a test
//! - [`detector`] - Shape-pair tests
//!
//! Shapes are stored relative to their owner and transformed to world space
//! only when a test runs.

pub mod shape;
pub mod manifold;
pub mod detector;

pub use shape::{ColliderShape, ShapeType, WorldSpaceShape};
pub use manifold::CollisionManifold;
pub use detector::CollisionDetector;
