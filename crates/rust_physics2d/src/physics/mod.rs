//! Physics module for collision detection and response
//!
//! Narrow-phase tests live in [`collision`], impulse response in
//! [`resolution`]. [`PhysicsWorld`] drives both once per frame over a
//! quadtree broad phase.

pub mod collision;
pub mod collision_layers;
pub mod physics_world;
pub mod resolution;

pub use collision::{
    CollisionDetector,
    CollisionManifold,
    ColliderShape,
    ShapeType,
    WorldSpaceShape,
};
pub use collision_layers::CollisionLayers;
pub use physics_world::{CollisionPair, ContactEvent, PhysicsWorld};
pub use resolution::{ContactBody, ResolutionSettings};
pub use crate::config::OutOfBoundsPolicy;
