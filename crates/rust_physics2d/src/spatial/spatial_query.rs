//! Abstract spatial query interface for broad-phase collision detection
//!
//! Lets the physics step talk to its spatial index without caring how the
//! index partitions space. The quadtree is the production implementation;
//! [`BruteForceIndex`] is the exact linear-scan reference it is checked
//! against.

use crate::ecs::Entity;
use crate::spatial::{Quadtree, AABB};

/// Abstract interface for spatial partitioning used in broad-phase collision detection
pub trait SpatialQuery: Send + Sync {
    /// Insert an entity with its current bounds
    fn insert(&mut self, entity: Entity, bounds: AABB);

    /// Candidates whose bounds may overlap `area`
    ///
    /// Implementations may return extra entities but must never omit one
    /// whose bounds overlap `area`.
    fn query_aabb(&self, area: &AABB) -> Vec<Entity>;

    /// Clear all entities from the spatial structure
    fn clear(&mut self);

    /// Get the number of entities in the structure
    fn entity_count(&self) -> usize;
}

impl SpatialQuery for Quadtree {
    fn insert(&mut self, entity: Entity, bounds: AABB) {
        Quadtree::insert(self, entity, bounds);
    }

    fn query_aabb(&self, area: &AABB) -> Vec<Entity> {
        self.query(area)
    }

    fn clear(&mut self) {
        Quadtree::clear(self);
    }

    fn entity_count(&self) -> usize {
        Quadtree::entity_count(self)
    }
}

/// Linear-scan index with exact overlap filtering
#[derive(Debug, Clone, Default)]
pub struct BruteForceIndex {
    entries: Vec<(Entity, AABB)>,
}

impl BruteForceIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpatialQuery for BruteForceIndex {
    fn insert(&mut self, entity: Entity, bounds: AABB) {
        self.entries.push((entity, bounds));
    }

    fn query_aabb(&self, area: &AABB) -> Vec<Entity> {
        self.entries
            .iter()
            .filter(|(_, bounds)| bounds.intersects(area))
            .map(|(entity, _)| *entity)
            .collect()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn entity_count(&self) -> usize {
        self.entries.len()
    }
}
