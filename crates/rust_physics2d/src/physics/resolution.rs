//! Impulse resolution and positional correction
//!
//! Every resolver reads both transforms, works on copies and writes the
//! results back. Static bodies are never moved and never gain velocity.

use crate::ecs::components::{ColliderComponent, PhysicsMaterialComponent, TransformComponent};
use crate::ecs::{Entity, World};
use crate::foundation::math::Vec2;
use crate::physics::collision::CollisionManifold;

/// Tunables shared by all resolvers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolutionSettings {
    /// Share of the penetration removed per resolution
    pub correction_percent: f32,

    /// Restitution used for a side without a material component
    pub default_restitution: f32,
}

impl Default for ResolutionSettings {
    fn default() -> Self {
        Self {
            correction_percent: 0.8,
            default_restitution: crate::ecs::components::DEFAULT_RESTITUTION,
        }
    }
}

/// One side of a contact as the resolver sees it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactBody {
    /// World position
    pub position: Vec2,
    /// Linear velocity
    pub velocity: Vec2,
    /// Infinite effective mass
    pub is_static: bool,
    /// Bounciness in [0, 1]
    pub restitution: f32,
}

impl ContactBody {
    fn load(world: &World, entity: Entity, default_restitution: f32) -> Option<Self> {
        let transform = world.get_component::<TransformComponent>(entity)?;
        let collider = world.get_component::<ColliderComponent>(entity)?;
        let restitution = world
            .get_component::<PhysicsMaterialComponent>(entity)
            .map_or(default_restitution, |material| material.restitution);

        Some(Self {
            position: transform.position,
            velocity: transform.velocity,
            is_static: collider.is_static,
            restitution,
        })
    }

    fn store(&self, world: &mut World, entity: Entity) {
        if self.is_static {
            return;
        }
        if let Some(transform) = world.get_component_mut::<TransformComponent>(entity) {
            transform.position = self.position;
            transform.velocity = self.velocity;
        }
    }
}

/// Apply the velocity impulse and positional correction for one contact
///
/// `manifold.normal` points from `a` to `b`. The impulse is applied only
/// while the bodies approach along the normal; the correction whenever
/// they penetrate.
pub fn apply_impulse_and_correction(
    a: &mut ContactBody,
    b: &mut ContactBody,
    manifold: &CollisionManifold,
    correction_percent: f32,
) {
    if a.is_static && b.is_static {
        return;
    }

    let normal = manifold.normal;
    let velocity_along_normal = (a.velocity - b.velocity).dot(&normal);

    if velocity_along_normal > 0.0 {
        let restitution = a.restitution.min(b.restitution);
        let j = -(1.0 + restitution) * velocity_along_normal;
        let impulse = normal * j;

        match (a.is_static, b.is_static) {
            (false, true) => a.velocity += impulse,
            (true, false) => b.velocity -= impulse,
            _ => {
                a.velocity += impulse * 0.5;
                b.velocity -= impulse * 0.5;
            }
        }
    }

    if manifold.penetration_depth > 0.0 {
        let correction = normal * (manifold.penetration_depth * correction_percent);

        match (a.is_static, b.is_static) {
            (false, true) => a.position -= correction,
            (true, false) => b.position += correction,
            _ => {
                a.position -= correction * 0.5;
                b.position += correction * 0.5;
            }
        }
    }
}

fn resolve_pair(
    world: &mut World,
    a: Entity,
    b: Entity,
    manifold: &CollisionManifold,
    settings: &ResolutionSettings,
) {
    let (Some(mut body_a), Some(mut body_b)) = (
        ContactBody::load(world, a, settings.default_restitution),
        ContactBody::load(world, b, settings.default_restitution),
    ) else {
        log::debug!("Skipping resolution of {:?} / {:?}: missing transform or collider", a, b);
        return;
    };

    apply_impulse_and_correction(&mut body_a, &mut body_b, manifold, settings.correction_percent);

    body_a.store(world, a);
    body_b.store(world, b);
}

/// Resolve a circle-circle contact
pub fn resolve_circle_circle(
    world: &mut World,
    a: Entity,
    b: Entity,
    manifold: &CollisionManifold,
    settings: &ResolutionSettings,
) {
    log::trace!(
        "Circle-circle {:?} -> {:?}: depth {:.3}",
        a,
        b,
        manifold.penetration_depth
    );
    resolve_pair(world, a, b, manifold, settings);
}

/// Resolve a contact between a circle and a box, in either order
pub fn resolve_circle_box(
    world: &mut World,
    a: Entity,
    b: Entity,
    manifold: &CollisionManifold,
    settings: &ResolutionSettings,
) {
    log::trace!("Circle-box {:?} -> {:?}: depth {:.3}", a, b, manifold.penetration_depth);
    resolve_pair(world, a, b, manifold, settings);
}

/// Resolve a box-box contact
pub fn resolve_box_box(
    world: &mut World,
    a: Entity,
    b: Entity,
    manifold: &CollisionManifold,
    settings: &ResolutionSettings,
) {
    log::trace!("Box-box {:?} -> {:?}: depth {:.3}", a, b, manifold.penetration_depth);
    resolve_pair(world, a, b, manifold, settings);
}
