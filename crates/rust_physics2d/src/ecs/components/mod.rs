//! ECS Components module
//!
//! Data consumed and produced by the physics step.

pub mod transform;
pub mod collision;
pub mod gravity;
pub mod material;

pub use transform::TransformComponent;
pub use collision::{ColliderComponent, CollisionStateComponent};
pub use gravity::{ForceAccumulatorComponent, GravityComponent};
pub use material::{PhysicsMaterialComponent, DEFAULT_RESTITUTION};
