//! Collider shape definitions
//!
//! Shapes are stored relative to their owner's position and resolved into
//! world space on demand, right before a collision test.

use crate::foundation::math::Vec2;
use crate::spatial::AABB;

/// Discriminant of a [`ColliderShape`], used for shape-pair dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    /// Circle collider
    Circle,
    /// Axis-aligned box collider
    Box,
}

/// Collision shape attached to an entity (local space)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Circle centered on the owner's position
    Circle {
        /// Circle radius
        radius: f32,
    },
    /// Axis-aligned box centered on the owner's position
    Box {
        /// Full width and height
        size: Vec2,
    },
}

impl ColliderShape {
    /// Circle shape
    pub fn circle(radius: f32) -> Self {
        Self::Circle {
            radius: radius.abs(),
        }
    }

    /// Box shape from full width and height
    pub fn rect(width: f32, height: f32) -> Self {
        Self::Box {
            size: Vec2::new(width.abs(), height.abs()),
        }
    }

    /// Shape discriminant
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Self::Circle { .. } => ShapeType::Circle,
            Self::Box { .. } => ShapeType::Box,
        }
    }

    /// Half extent of the shape's bounding box
    pub fn half_extent(&self) -> Vec2 {
        match self {
            Self::Circle { radius } => Vec2::new(*radius, *radius),
            Self::Box { size } => *size * 0.5,
        }
    }

    /// Broad-phase bounds when the owner sits at `position`
    pub fn aabb(&self, position: Vec2) -> AABB {
        AABB::new(position, self.half_extent())
    }

    /// Resolve this shape against its owner's position
    pub fn to_world_space(&self, position: Vec2) -> WorldSpaceShape {
        match self {
            Self::Circle { radius } => WorldSpaceShape::Circle {
                center: position,
                radius: *radius,
            },
            Self::Box { size } => WorldSpaceShape::Box(AABB::from_center_size(position, *size)),
        }
    }
}

/// Collider resolved to world space, the input of every narrow-phase test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldSpaceShape {
    /// World-space circle
    Circle {
        /// Center in world space
        center: Vec2,
        /// Radius
        radius: f32,
    },
    /// World-space box
    Box(AABB),
}
