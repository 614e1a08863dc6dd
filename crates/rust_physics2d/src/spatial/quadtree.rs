//! Quadtree spatial partitioning structure
//!
//! Divides 2D space into hierarchical regions for broad-phase collision
//! detection. A leaf subdivides into 4 quadrants when it reaches capacity,
//! unless it already sits at the maximum depth.
//!
//! Each entry lives in the deepest node whose bounds fully contain its AABB,
//! so entries straddling a quadrant boundary stay in the parent. Queries
//! return whole node lists without per-entry filtering: callers get false
//! positives, never false negatives.

use crate::ecs::Entity;
use crate::spatial::AABB;
use serde::{Deserialize, Serialize};

/// Configuration for quadtree behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadtreeConfig {
    /// Entries a leaf holds before it subdivides
    pub capacity: usize,

    /// Maximum subdivision depth (root is depth 0)
    pub max_depth: u32,
}

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self {
            capacity: 8,
            max_depth: 5,
        }
    }
}

/// Entity stored in the quadtree with its bounds at insertion time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadtreeEntry {
    /// Stored entity
    pub id: Entity,
    /// Bounds used to place the entity
    pub bounds: AABB,
}

/// Single node in the quadtree hierarchy
#[derive(Debug, Clone)]
pub struct QuadtreeNode {
    /// World-space bounds of this node
    pub bounds: AABB,

    /// Entries held directly by this node
    pub entries: Vec<QuadtreeEntry>,

    /// Child nodes (4 quadrants), None if this is a leaf
    pub children: Option<Box<[QuadtreeNode; 4]>>,

    /// Depth in the tree (0 = root)
    pub depth: u32,
}

impl QuadtreeNode {
    /// Create a new leaf node
    pub fn new(bounds: AABB, depth: u32) -> Self {
        Self {
            bounds,
            entries: Vec::new(),
            children: None,
            depth,
        }
    }

    /// Check if this node is a leaf (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Index of the child that fully contains `bounds`, if any
    fn child_index_for(&self, bounds: &AABB) -> Option<usize> {
        self.children
            .as_ref()?
            .iter()
            .position(|child| child.bounds.contains_aabb(bounds))
    }

    /// Subdivide this node into 4 children and push down what fits
    fn subdivide(&mut self, config: &QuadtreeConfig) {
        if self.children.is_some() {
            return;
        }

        let depth = self.depth + 1;
        let bounds = self.bounds;
        self.children = Some(Box::new(std::array::from_fn(|quadrant| {
            QuadtreeNode::new(bounds.quadrant(quadrant), depth)
        })));

        let entries_to_distribute = std::mem::take(&mut self.entries);
        for entry in entries_to_distribute {
            match self.child_index_for(&entry.bounds) {
                Some(index) => {
                    if let Some(children) = self.children.as_mut() {
                        children[index].insert(entry, config);
                    }
                }
                None => self.entries.push(entry),
            }
        }
    }

    /// Insert an entry into this node or one of its descendants
    pub fn insert(&mut self, entry: QuadtreeEntry, config: &QuadtreeConfig) {
        if self.is_leaf() {
            let should_subdivide =
                self.entries.len() >= config.capacity && self.depth < config.max_depth;
            if !should_subdivide {
                self.entries.push(entry);
                return;
            }
            self.subdivide(config);
        }

        if let Some(index) = self.child_index_for(&entry.bounds) {
            if let Some(children) = self.children.as_mut() {
                children[index].insert(entry, config);
                return;
            }
        }

        // Straddles a quadrant boundary (or lies outside the node)
        self.entries.push(entry);
    }

    /// Collect entries of this node and of every child overlapping `area`
    pub fn query(&self, area: &AABB, results: &mut Vec<Entity>) {
        results.extend(self.entries.iter().map(|entry| entry.id));

        if let Some(ref children) = self.children {
            for child in children.iter() {
                if child.bounds.intersects(area) {
                    child.query(area, results);
                }
            }
        }
    }

    /// Get all leaf nodes (for visualization)
    pub fn get_all_leaves<'a>(&'a self, leaves: &mut Vec<&'a QuadtreeNode>) {
        if self.is_leaf() {
            leaves.push(self);
        } else if let Some(ref children) = self.children {
            for child in children.iter() {
                child.get_all_leaves(leaves);
            }
        }
    }

    /// Get all nodes at a specific depth (for visualization)
    pub fn get_nodes_at_depth<'a>(&'a self, target_depth: u32, nodes: &mut Vec<&'a QuadtreeNode>) {
        if self.depth == target_depth {
            nodes.push(self);
        } else if let Some(ref children) = self.children {
            for child in children.iter() {
                child.get_nodes_at_depth(target_depth, nodes);
            }
        }
    }

    /// Count total entries in this node and all children
    pub fn count_entities(&self) -> usize {
        let mut count = self.entries.len();

        if let Some(ref children) = self.children {
            for child in children.iter() {
                count += child.count_entities();
            }
        }

        count
    }

    /// Deepest level reached below (and including) this node
    pub fn max_depth_reached(&self) -> u32 {
        self.children.as_ref().map_or(self.depth, |children| {
            children
                .iter()
                .map(QuadtreeNode::max_depth_reached)
                .max()
                .unwrap_or(self.depth)
        })
    }
}

/// Quadtree spatial partitioning structure
#[derive(Debug, Clone)]
pub struct Quadtree {
    /// Root node covering the whole world
    pub root: QuadtreeNode,

    config: QuadtreeConfig,
}

impl Quadtree {
    /// Create a new quadtree with given world bounds
    pub fn new(world_bounds: AABB, config: QuadtreeConfig) -> Self {
        Self {
            root: QuadtreeNode::new(world_bounds, 0),
            config,
        }
    }

    /// Insert an entity keyed by its current bounds
    pub fn insert(&mut self, entity: Entity, bounds: AABB) {
        self.root.insert(QuadtreeEntry { id: entity, bounds }, &self.config);
    }

    /// Entities whose nodes overlap `area`
    ///
    /// Superset of the entities whose bounds overlap `area`.
    pub fn query(&self, area: &AABB) -> Vec<Entity> {
        let mut results = Vec::new();
        self.root.query(area, &mut results);
        results
    }

    /// Reset to a single empty root with the configured bounds
    pub fn clear(&mut self) {
        self.root = QuadtreeNode::new(self.root.bounds, 0);
    }

    /// Replace the world bounds and clear the tree
    pub fn reset(&mut self, world_bounds: AABB) {
        self.root = QuadtreeNode::new(world_bounds, 0);
    }

    /// World bounds covered by the root
    pub fn bounds(&self) -> AABB {
        self.root.bounds
    }

    /// Subdivision settings
    pub fn config(&self) -> &QuadtreeConfig {
        &self.config
    }

    /// Get total entity count
    pub fn entity_count(&self) -> usize {
        self.root.count_entities()
    }

    /// Deepest level currently in use
    pub fn depth(&self) -> u32 {
        self.root.max_depth_reached()
    }

    /// Get all leaf nodes (for visualization)
    pub fn get_all_leaves(&self) -> Vec<&QuadtreeNode> {
        let mut leaves = Vec::new();
        self.root.get_all_leaves(&mut leaves);
        leaves
    }

    /// Get all nodes at a specific depth (for visualization)
    pub fn get_nodes_at_depth(&self, depth: u32) -> Vec<&QuadtreeNode> {
        let mut nodes = Vec::new();
        self.root.get_nodes_at_depth(depth, &mut nodes);
        nodes
    }
}
