//! # Rust Physics 2D
//!
//! A 2D collision kernel for fixed-rate game loops: quadtree broad phase,
//! circle and axis-aligned box narrow phase, impulse resolution with
//! positional correction.
//!
//! ## Quick Start
//!
//! ```rust
//! use rust_physics2d::prelude::*;
//!
//! let mut world = World::new();
//! let ball = world.create_entity();
//! world.add_component(ball, TransformComponent::from_position(Vec2::new(0.0, 0.0)));
//! world.add_component(ball, ColliderComponent::circle(5.0));
//! world.add_component(ball, GravityComponent::default());
//!
//! let mut physics = PhysicsWorld::new();
//! physics.update(&mut world, 1.0 / 60.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod error;
pub mod foundation;
pub mod physics;
pub mod spatial;

pub use error::PhysicsError;

/// Common imports for kernel users
pub mod prelude {
    pub use crate::{
        config::{Config, OutOfBoundsPolicy, PhysicsConfig},
        ecs::{
            components::{
                ColliderComponent, CollisionStateComponent, ForceAccumulatorComponent,
                GravityComponent, PhysicsMaterialComponent, TransformComponent,
            },
            Component, Entity, World,
        },
        error::PhysicsError,
        foundation::math::Vec2,
        physics::{
            CollisionDetector, CollisionLayers, CollisionManifold, CollisionPair, ContactEvent,
            PhysicsWorld,
        },
        spatial::{Quadtree, QuadtreeConfig, SpatialQuery, AABB},
    };
}
