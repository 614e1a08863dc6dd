//! Narrow-phase collision detection
//!
//! Exact shape-vs-shape tests producing a [`CollisionManifold`]. Everything
//! here is a pure function of the two world-space shapes: no state, no side
//! effects. The manifold normal always points from the first argument toward
//! the second; swapping the arguments flips the normal and never changes
//! whether a collision is reported.

use super::manifold::CollisionManifold;
use super::shape::WorldSpaceShape;
use crate::ecs::components::{ColliderComponent, TransformComponent};
use crate::ecs::{Entity, World};
use crate::foundation::math::{sign_or_positive, unit_x, Vec2, EPSILON};
use crate::spatial::AABB;

/// Stateless narrow-phase collision detector
pub struct CollisionDetector;

impl CollisionDetector {
    /// Test whether two shapes overlap or touch
    pub fn intersects(a: &WorldSpaceShape, b: &WorldSpaceShape) -> bool {
        match (a, b) {
            (
                WorldSpaceShape::Circle { center: ca, radius: ra },
                WorldSpaceShape::Circle { center: cb, radius: rb },
            ) => {
                let radius_sum = ra + rb;
                (cb - ca).norm_squared() <= radius_sum * radius_sum
            }
            (WorldSpaceShape::Circle { center, radius }, WorldSpaceShape::Box(aabb))
            | (WorldSpaceShape::Box(aabb), WorldSpaceShape::Circle { center, radius }) => {
                (aabb.clamp_point(*center) - center).norm_squared() <= radius * radius
            }
            (WorldSpaceShape::Box(a), WorldSpaceShape::Box(b)) => {
                let (overlap_x, overlap_y) = Self::box_overlaps(a, b);
                overlap_x >= 0.0 && overlap_y >= 0.0
            }
        }
    }

    /// Full contact information for two shapes
    pub fn get_manifold(a: &WorldSpaceShape, b: &WorldSpaceShape) -> CollisionManifold {
        match (a, b) {
            (
                WorldSpaceShape::Circle { center: ca, radius: ra },
                WorldSpaceShape::Circle { center: cb, radius: rb },
            ) => Self::circle_circle(*ca, *ra, *cb, *rb),
            (WorldSpaceShape::Circle { center, radius }, WorldSpaceShape::Box(aabb)) => {
                Self::circle_box(*center, *radius, aabb)
            }
            (WorldSpaceShape::Box(aabb), WorldSpaceShape::Circle { center, radius }) => {
                let manifold = Self::circle_box(*center, *radius, aabb);
                if manifold.has_collision {
                    manifold.flipped()
                } else {
                    manifold
                }
            }
            (WorldSpaceShape::Box(a), WorldSpaceShape::Box(b)) => Self::box_box(a, b),
        }
    }

    /// Resolve an entity's collider against its transform
    ///
    /// `None` when either component is missing or the handle is stale.
    pub fn world_shape(world: &World, entity: Entity) -> Option<WorldSpaceShape> {
        let collider = world.get_component::<ColliderComponent>(entity)?;
        let transform = world.get_component::<TransformComponent>(entity)?;
        Some(collider.shape.to_world_space(transform.position))
    }

    /// Manifold between two entities of the world
    ///
    /// Returns `None` (and logs) when either side lacks a collider or a
    /// transform; such pairs are skipped, never treated as errors.
    pub fn manifold_between(world: &World, a: Entity, b: Entity) -> Option<CollisionManifold> {
        let Some(shape_a) = Self::world_shape(world, a) else {
            log::debug!("Skipping pair {:?}/{:?}: {:?} has no collider or transform", a, b, a);
            return None;
        };
        let Some(shape_b) = Self::world_shape(world, b) else {
            log::debug!("Skipping pair {:?}/{:?}: {:?} has no collider or transform", a, b, b);
            return None;
        };
        Some(Self::get_manifold(&shape_a, &shape_b))
    }

    /// Circle A against circle B
    pub fn circle_circle(
        center_a: Vec2,
        radius_a: f32,
        center_b: Vec2,
        radius_b: f32,
    ) -> CollisionManifold {
        let delta = center_b - center_a;
        let distance_sq = delta.norm_squared();
        let radius_sum = radius_a + radius_b;
        if distance_sq > radius_sum * radius_sum {
            return CollisionManifold::none();
        }

        let distance = distance_sq.sqrt();
        if distance < EPSILON {
            // Coincident centers: any direction separates them
            let normal = unit_x();
            return CollisionManifold::single(normal, radius_a, center_a + normal * radius_a);
        }

        let normal = delta / distance;
        CollisionManifold::single(normal, radius_sum - distance, center_a + normal * radius_a)
    }

    /// Circle A against box B
    pub fn circle_box(center: Vec2, radius: f32, aabb: &AABB) -> CollisionManifold {
        let closest = aabb.clamp_point(center);
        let delta = closest - center;
        let distance_sq = delta.norm_squared();
        if distance_sq > radius * radius {
            return CollisionManifold::none();
        }

        if distance_sq < EPSILON * EPSILON {
            return Self::circle_center_inside_box(center, radius, aabb);
        }

        let distance = distance_sq.sqrt();
        let normal = delta / distance;
        CollisionManifold::single(normal, radius - distance, center + normal * radius)
    }

    /// Circle center inside (or on the boundary of) the box
    ///
    /// The nearest edge decides the push-out axis; the circle has to travel
    /// past that edge plus its own radius to separate.
    fn circle_center_inside_box(center: Vec2, radius: f32, aabb: &AABB) -> CollisionManifold {
        let (min, max) = (aabb.min(), aabb.max());
        let candidates = [
            (center.x - min.x, Vec2::new(-1.0, 0.0)),
            (max.x - center.x, Vec2::new(1.0, 0.0)),
            (center.y - min.y, Vec2::new(0.0, -1.0)),
            (max.y - center.y, Vec2::new(0.0, 1.0)),
        ];
        let (edge_distance, exit) = candidates
            .iter()
            .copied()
            .fold(candidates[0], |best, candidate| {
                if candidate.0 < best.0 {
                    candidate
                } else {
                    best
                }
            });
        let edge_distance = edge_distance.max(0.0);

        // The circle leaves along `exit`, so the box lies along `-exit` from it.
        CollisionManifold::single(-exit, radius + edge_distance, center + exit * edge_distance)
    }

    /// Box A against box B
    pub fn box_box(a: &AABB, b: &AABB) -> CollisionManifold {
        let (overlap_x, overlap_y) = Self::box_overlaps(a, b);
        if overlap_x < 0.0 || overlap_y < 0.0 {
            return CollisionManifold::none();
        }

        let delta = b.center - a.center;
        let (a_min, a_max, b_min, b_max) = (a.min(), a.max(), b.min(), b.max());

        // Centers aligned on the least-overlap axis carry no direction there;
        // fall back to the other axis unless the centers coincide.
        let use_x = if overlap_x <= overlap_y {
            delta.x != 0.0 || delta.y == 0.0
        } else {
            delta.y == 0.0 && delta.x != 0.0
        };

        if use_x {
            let side = sign_or_positive(delta.x);
            let span_mid = (a_min.y.max(b_min.y) + a_max.y.min(b_max.y)) * 0.5;
            let contact = Vec2::new(a.center.x + side * a.half_extent.x, span_mid);
            CollisionManifold::single(Vec2::new(side, 0.0), overlap_x, contact)
        } else {
            let side = sign_or_positive(delta.y);
            let span_mid = (a_min.x.max(b_min.x) + a_max.x.min(b_max.x)) * 0.5;
            let contact = Vec2::new(span_mid, a.center.y + side * a.half_extent.y);
            CollisionManifold::single(Vec2::new(0.0, side), overlap_y, contact)
        }
    }

    /// Per-axis overlap of two boxes (negative means separated on that axis)
    fn box_overlaps(a: &AABB, b: &AABB) -> (f32, f32) {
        let delta = (b.center - a.center).abs();
        let reach = a.half_extent + b.half_extent;
        (reach.x - delta.x, reach.y - delta.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collision::ColliderShape;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn circle(x: f32, y: f32, radius: f32) -> WorldSpaceShape {
        ColliderShape::circle(radius).to_world_space(Vec2::new(x, y))
    }

    fn rect(x: f32, y: f32, width: f32, height: f32) -> WorldSpaceShape {
        ColliderShape::rect(width, height).to_world_space(Vec2::new(x, y))
    }

    #[test]
    fn test_circle_circle_touching_counts() {
        let a = circle(0.0, 0.0, 2.0);
        assert!(CollisionDetector::intersects(&a, &circle(4.0, 0.0, 2.0)));
        assert!(!CollisionDetector::intersects(&a, &circle(4.01, 0.0, 2.0)));
    }

    #[test]
    fn test_box_box_touching_counts() {
        let a = rect(0.0, 0.0, 20.0, 20.0);
        assert!(CollisionDetector::intersects(&a, &rect(20.0, 0.0, 20.0, 20.0)));
        assert!(!CollisionDetector::intersects(&a, &rect(21.0, 0.0, 20.0, 20.0)));
    }

    #[test]
    fn test_circle_circle_manifold() {
        let manifold = CollisionDetector::get_manifold(&circle(0.0, 0.0, 25.0), &circle(40.0, 0.0, 25.0));
        assert!(manifold.has_collision);
        assert_relative_eq!(manifold.normal, Vec2::new(1.0, 0.0));
        assert_relative_eq!(manifold.penetration_depth, 10.0);
        assert_eq!(manifold.contact_points, vec![Vec2::new(25.0, 0.0)]);
    }

    #[test]
    fn test_circle_circle_coincident_centers() {
        let manifold = CollisionDetector::get_manifold(&circle(5.0, 5.0, 3.0), &circle(5.0, 5.0, 1.0));
        assert!(manifold.has_collision);
        assert_eq!(manifold.normal, Vec2::new(1.0, 0.0));
        assert_eq!(manifold.penetration_depth, 3.0);
        assert!(manifold.normal.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_circle_box_outside_edge() {
        // Circle left of the box, overlapping its left face by 2
        let manifold = CollisionDetector::get_manifold(&circle(-13.0, 0.0, 5.0), &rect(0.0, 0.0, 20.0, 20.0));
        assert!(manifold.has_collision);
        assert_relative_eq!(manifold.normal, Vec2::new(1.0, 0.0));
        assert_relative_eq!(manifold.penetration_depth, 2.0);
        assert_relative_eq!(manifold.contact_points[0], Vec2::new(-8.0, 0.0));
    }

    #[test]
    fn test_circle_box_corner_miss() {
        // Inside the AABB-vs-AABB overlap but past the rounded corner
        let b = rect(0.0, 0.0, 20.0, 20.0);
        assert!(!CollisionDetector::intersects(&circle(14.0, 14.0, 5.0), &b));
        assert!(CollisionDetector::intersects(&circle(13.0, 13.0, 5.0), &b));
    }

    #[test]
    fn test_circle_center_inside_box_uses_nearest_edge() {
        // Closest to the top edge (distance 2)
        let manifold = CollisionDetector::get_manifold(&circle(1.0, 8.0, 3.0), &rect(0.0, 0.0, 20.0, 20.0));
        assert!(manifold.has_collision);
        assert_eq!(manifold.normal, Vec2::new(0.0, -1.0));
        assert_relative_eq!(manifold.penetration_depth, 5.0);
        assert_relative_eq!(manifold.contact_points[0], Vec2::new(1.0, 10.0));
    }

    #[test]
    fn test_box_circle_flips_normal() {
        let c = circle(-13.0, 0.0, 5.0);
        let b = rect(0.0, 0.0, 20.0, 20.0);
        let forward = CollisionDetector::get_manifold(&c, &b);
        let reverse = CollisionDetector::get_manifold(&b, &c);
        assert_relative_eq!(forward.normal, -reverse.normal);
        assert_relative_eq!(forward.penetration_depth, reverse.penetration_depth);
    }

    #[test]
    fn test_box_box_least_overlap_axis() {
        // Overlap 2 on x, 15 on y
        let manifold = CollisionDetector::get_manifold(&rect(0.0, 0.0, 20.0, 20.0), &rect(18.0, 5.0, 20.0, 20.0));
        assert!(manifold.has_collision);
        assert_eq!(manifold.normal, Vec2::new(1.0, 0.0));
        assert_relative_eq!(manifold.penetration_depth, 2.0);
        // On A's right edge, midway through the shared y span [-5, 10]
        assert_relative_eq!(manifold.contact_points[0], Vec2::new(10.0, 2.5));

        let below = CollisionDetector::get_manifold(&rect(0.0, 0.0, 20.0, 20.0), &rect(3.0, -19.0, 20.0, 20.0));
        assert_eq!(below.normal, Vec2::new(0.0, -1.0));
        assert_relative_eq!(below.penetration_depth, 1.0);
    }

    #[test]
    fn test_box_box_aligned_centers_use_other_axis() {
        // Same x, so the x axis (overlap 10) has no direction; y (overlap 35) decides
        let a = rect(0.0, 0.0, 10.0, 40.0);
        let b = rect(0.0, 5.0, 10.0, 40.0);
        let forward = CollisionDetector::get_manifold(&a, &b);
        let reverse = CollisionDetector::get_manifold(&b, &a);

        assert_eq!(forward.normal, Vec2::new(0.0, 1.0));
        assert_eq!(reverse.normal, Vec2::new(0.0, -1.0));
        assert_relative_eq!(forward.penetration_depth, 35.0);
        assert_relative_eq!(reverse.penetration_depth, 35.0);

        // Coincident centers keep the +x fallback
        let same = CollisionDetector::get_manifold(&a, &rect(0.0, 0.0, 10.0, 40.0));
        assert_eq!(same.normal, Vec2::new(1.0, 0.0));
        assert_relative_eq!(same.penetration_depth, 10.0);
    }

    #[test]
    fn test_symmetry_and_normal_convention() {
        let shapes = [
            circle(0.0, 0.0, 5.0),
            circle(7.0, 2.0, 4.0),
            rect(3.0, -4.0, 8.0, 6.0),
            rect(-6.0, 1.0, 10.0, 4.0),
            circle(30.0, 30.0, 1.0),
            rect(-30.0, 0.0, 2.0, 2.0),
            rect(0.0, 0.0, 10.0, 40.0),
            rect(0.0, 5.0, 10.0, 40.0),
        ];
        for a in &shapes {
            for b in &shapes {
                if std::ptr::eq(a, b) {
                    continue;
                }
                let ab = CollisionDetector::intersects(a, b);
                assert_eq!(ab, CollisionDetector::intersects(b, a), "{:?} vs {:?}", a, b);

                let forward = CollisionDetector::get_manifold(a, b);
                let reverse = CollisionDetector::get_manifold(b, a);
                assert_eq!(forward.has_collision, ab);
                if forward.has_collision && reverse.has_collision {
                    assert_relative_eq!(forward.normal, -reverse.normal, epsilon = 1.0e-5);
                    assert_relative_eq!(forward.normal.norm(), 1.0, epsilon = 1.0e-5);
                }
            }
        }
    }

    // Integer coordinates make aligned and touching shapes common
    fn arb_shape() -> impl Strategy<Value = WorldSpaceShape> {
        let circle_shape = (-20i32..20, -20i32..20, 1i32..12)
            .prop_map(|(x, y, r)| circle(x as f32, y as f32, r as f32));
        let box_shape = (-20i32..20, -20i32..20, 1i32..24, 1i32..24)
            .prop_map(|(x, y, w, h)| rect(x as f32, y as f32, w as f32, h as f32));
        prop_oneof![circle_shape, box_shape]
    }

    fn center_of(shape: &WorldSpaceShape) -> Vec2 {
        match shape {
            WorldSpaceShape::Circle { center, .. } => *center,
            WorldSpaceShape::Box(aabb) => aabb.center,
        }
    }

    proptest! {
        #[test]
        fn prop_detection_is_symmetric(a in arb_shape(), b in arb_shape()) {
            let ab = CollisionDetector::intersects(&a, &b);
            prop_assert_eq!(ab, CollisionDetector::intersects(&b, &a));

            let forward = CollisionDetector::get_manifold(&a, &b);
            let reverse = CollisionDetector::get_manifold(&b, &a);
            prop_assert_eq!(forward.has_collision, ab);
            prop_assert_eq!(reverse.has_collision, ab);

            // Coincident centers have no direction to flip
            if ab && center_of(&a) != center_of(&b) {
                prop_assert!((forward.normal + reverse.normal).norm() < 1.0e-5,
                    "{:?} vs {:?}: {:?} / {:?}", a, b, forward.normal, reverse.normal);
                prop_assert!((forward.normal.norm() - 1.0).abs() < 1.0e-5);
                prop_assert!((forward.penetration_depth - reverse.penetration_depth).abs() < 1.0e-4);
                prop_assert!(forward.penetration_depth >= 0.0);
            }
        }
    }

    #[test]
    fn test_manifold_between_skips_missing_components() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        world.add_component(a, ColliderComponent::new(ColliderShape::circle(1.0)));
        world.add_component(a, TransformComponent::default());
        world.add_component(b, ColliderComponent::new(ColliderShape::circle(1.0)));

        assert!(CollisionDetector::manifold_between(&world, a, b).is_none());

        world.add_component(b, TransformComponent::from_position(Vec2::new(1.5, 0.0)));
        let manifold = CollisionDetector::manifold_between(&world, a, b).unwrap();
        assert!(manifold.has_collision);
    }
}
