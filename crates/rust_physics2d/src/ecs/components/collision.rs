//! Collision detection components for ECS

use crate::ecs::{Component, Entity};
use crate::foundation::math::Vec2;
use crate::physics::collision::{ColliderShape, ShapeType};
use crate::physics::CollisionLayers;
use crate::spatial::AABB;
use std::collections::HashSet;

/// Component that marks an entity as having collision detection enabled
///
/// The shape is centered on the entity's `TransformComponent` position.
#[derive(Debug, Clone, PartialEq)]
pub struct ColliderComponent {
    /// The collision shape (circle or box)
    pub shape: ColliderShape,

    /// Collision layer bitmask (what layer is this entity on?)
    pub layer: CollisionLayers,

    /// Collision mask (what layers can this entity collide with?)
    pub mask: CollisionLayers,

    /// Is this a trigger volume (reports overlaps but no physical response)?
    pub is_trigger: bool,

    /// Is this collider immovable? Static colliders are never pushed or
    /// given velocity by collision resolution.
    pub is_static: bool,
}

impl Component for ColliderComponent {}

impl ColliderComponent {
    /// Create a new collider with default settings
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            layer: CollisionLayers::ALL_LAYERS,
            mask: CollisionLayers::ALL_LAYERS,
            is_trigger: false,
            is_static: false,
        }
    }

    /// Circle collider
    pub fn circle(radius: f32) -> Self {
        Self::new(ColliderShape::circle(radius))
    }

    /// Box collider from full width and height
    pub fn rect(width: f32, height: f32) -> Self {
        Self::new(ColliderShape::rect(width, height))
    }

    /// Create a collider with specific layer and mask
    pub fn with_layers(mut self, layer: CollisionLayers, mask: CollisionLayers) -> Self {
        self.layer = layer;
        self.mask = mask;
        self
    }

    /// Mark this as a trigger volume
    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Mark this collider as immovable
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Shape discriminant
    pub fn shape_type(&self) -> ShapeType {
        self.shape.shape_type()
    }

    /// Broad-phase bounds when the owner sits at `position`
    pub fn aabb(&self, position: Vec2) -> AABB {
        self.shape.aabb(position)
    }
}

/// Component that tracks the current collision state of an entity
///
/// Refreshed by the physics step for every entity that carries it. Trigger
/// overlaps are reported here like any other contact.
#[derive(Debug, Default, Clone)]
pub struct CollisionStateComponent {
    /// All entities we're currently colliding with
    pub colliding_with: HashSet<Entity>,

    /// Entities we started colliding with this frame (entered collision)
    pub collision_entered: Vec<Entity>,

    /// Entities we stopped colliding with this frame (exited collision)
    pub collision_exited: Vec<Entity>,

    /// Entities returned by the broad phase for this entity's bounds
    pub nearby_entities: HashSet<Entity>,
}

impl Component for CollisionStateComponent {}

impl CollisionStateComponent {
    /// Check if we're currently colliding with any entity
    pub fn is_colliding(&self) -> bool {
        !self.colliding_with.is_empty()
    }

    /// Check if we're colliding with a specific entity
    pub fn is_colliding_with(&self, entity: Entity) -> bool {
        self.colliding_with.contains(&entity)
    }

    /// Get the number of entities we're colliding with
    pub fn collision_count(&self) -> usize {
        self.colliding_with.len()
    }

    /// Check if we just started colliding with a specific entity this frame
    pub fn just_collided_with(&self, entity: Entity) -> bool {
        self.collision_entered.contains(&entity)
    }

    /// Check if we just stopped colliding with a specific entity this frame
    pub fn just_stopped_colliding_with(&self, entity: Entity) -> bool {
        self.collision_exited.contains(&entity)
    }

    /// Clear all per-frame data before the step refills it
    pub(crate) fn clear_frame_data(&mut self) {
        self.colliding_with.clear();
        self.collision_entered.clear();
        self.collision_exited.clear();
        self.nearby_entities.clear();
    }
}
