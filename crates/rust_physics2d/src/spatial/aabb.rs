//! Axis-aligned bounding box
//!
//! Stored as center + half extent. Used by the quadtree for node bounds and
//! by both collider shapes for their broad-phase bounds.

use crate::foundation::math::{clamp_components, Vec2};
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box for spatial queries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AABB {
    /// Center of the box
    pub center: Vec2,
    /// Half size along each axis (never negative)
    pub half_extent: Vec2,
}

impl AABB {
    /// Create an AABB centered at a point with given half extents
    ///
    /// Negative half extents are flipped to keep the box well formed.
    pub fn new(center: Vec2, half_extent: Vec2) -> Self {
        Self {
            center,
            half_extent: half_extent.abs(),
        }
    }

    /// Create an AABB from a center and a full width/height
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self::new(center, size * 0.5)
    }

    /// Create an AABB from min and max corners
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        let lo = Vec2::new(min.x.min(max.x), min.y.min(max.y));
        let hi = Vec2::new(min.x.max(max.x), min.y.max(max.y));
        Self {
            center: (lo + hi) * 0.5,
            half_extent: (hi - lo) * 0.5,
        }
    }

    /// Minimum corner
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extent
    }

    /// Maximum corner
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extent
    }

    /// Full width and height
    pub fn size(&self) -> Vec2 {
        self.half_extent * 2.0
    }

    /// Check if this AABB contains a point (edges included)
    pub fn contains_point(&self, point: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Check if `other` lies entirely inside this AABB (edges included)
    pub fn contains_aabb(&self, other: &AABB) -> bool {
        let (min, max) = (self.min(), self.max());
        let (other_min, other_max) = (other.min(), other.max());
        other_min.x >= min.x && other_max.x <= max.x && other_min.y >= min.y && other_max.y <= max.y
    }

    /// Check if this AABB intersects another AABB
    ///
    /// Touching edges count as intersecting so that shapes in contact are
    /// never culled by the broad phase.
    pub fn intersects(&self, other: &AABB) -> bool {
        let delta = (other.center - self.center).abs();
        delta.x <= self.half_extent.x + other.half_extent.x
            && delta.y <= self.half_extent.y + other.half_extent.y
    }

    /// Closest point inside this box to `point`
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        clamp_components(point, self.min(), self.max())
    }

    /// One of the four equal sub-boxes
    ///
    /// Bit 0 selects +X, bit 1 selects +Y:
    /// 0: -X -Y, 1: +X -Y, 2: -X +Y, 3: +X +Y
    pub fn quadrant(&self, index: usize) -> AABB {
        let quarter = self.half_extent * 0.5;
        let x_sign = if index & 1 != 0 { 1.0 } else { -1.0 };
        let y_sign = if index & 2 != 0 { 1.0 } else { -1.0 };
        AABB::new(
            Vec2::new(self.center.x + quarter.x * x_sign, self.center.y + quarter.y * y_sign),
            quarter,
        )
    }
}
