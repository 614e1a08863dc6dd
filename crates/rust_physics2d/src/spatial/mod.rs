//! Spatial partitioning data structures
//!
//! Provides the bounding-box type and the broad-phase index used to find
//! collision candidates in 2D space.

mod aabb;
mod quadtree;
mod spatial_query;

pub use aabb::AABB;
pub use quadtree::{Quadtree, QuadtreeConfig, QuadtreeEntry, QuadtreeNode};
pub use spatial_query::{BruteForceIndex, SpatialQuery};
