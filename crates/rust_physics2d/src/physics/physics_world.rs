//! Per-frame physics step
//!
//! [`PhysicsWorld::update`] runs the phases in a fixed order: gravity, force
//! bookkeeping, integration, bounds enforcement with a quadtree rebuild,
//! broad and narrow phase with immediate resolution, then collision state.
//! Later pairs in the same step see positions already moved by earlier
//! resolutions.

use crate::config::{validate_world_bounds, OutOfBoundsPolicy, PhysicsConfig};
use crate::ecs::components::{
    ColliderComponent, CollisionStateComponent, ForceAccumulatorComponent, GravityComponent,
    TransformComponent,
};
use crate::ecs::{Entity, World};
use crate::error::PhysicsError;
use crate::foundation::math::{clamp_components, Vec2};
use crate::physics::collision::{CollisionDetector, CollisionManifold, ShapeType};
use crate::physics::resolution::{self, ResolutionSettings};
use crate::physics::CollisionLayers;
use crate::spatial::{Quadtree, AABB};
use std::collections::{HashMap, HashSet};

/// Two colliding entities, smaller id first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollisionPair {
    /// Entity with the smaller id
    pub entity_a: Entity,
    /// Entity with the larger id
    pub entity_b: Entity,
}

impl CollisionPair {
    /// Create a new collision pair (always stores smaller entity id first)
    pub fn new(entity_a: Entity, entity_b: Entity) -> Self {
        if entity_a.id() < entity_b.id() {
            Self { entity_a, entity_b }
        } else {
            Self {
                entity_a: entity_b,
                entity_b: entity_a,
            }
        }
    }

    /// The other side of the pair, if `entity` is part of it
    pub fn partner_of(&self, entity: Entity) -> Option<Entity> {
        if self.entity_a == entity {
            Some(self.entity_b)
        } else if self.entity_b == entity {
            Some(self.entity_a)
        } else {
            None
        }
    }
}

/// Contact found during the last step
///
/// The manifold is the one computed before resolution, with its normal
/// pointing from `entity_a` to `entity_b`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactEvent {
    /// Lower-id side
    pub entity_a: Entity,
    /// Higher-id side
    pub entity_b: Entity,
    /// Either side is a trigger, so nothing was resolved
    pub is_trigger: bool,
    /// Contact geometry
    pub manifold: CollisionManifold,
}

/// Physics simulation state owned by the caller
///
/// Holds no entity data itself; everything lives in the [`World`] passed to
/// [`update`](Self::update).
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    config: PhysicsConfig,
    quadtree: Quadtree,
    contacts: Vec<ContactEvent>,
    current_pairs: HashSet<CollisionPair>,
    previous_pairs: HashSet<CollisionPair>,
}

impl PhysicsWorld {
    /// Physics world with the default configuration
    pub fn new() -> Self {
        Self::from_valid_config(PhysicsConfig::default())
    }

    /// Physics world with a custom configuration
    pub fn with_config(config: PhysicsConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: PhysicsConfig) -> Self {
        let quadtree = Quadtree::new(config.world_bounds(), config.quadtree);
        Self {
            config,
            quadtree,
            contacts: Vec::new(),
            current_pairs: HashSet::new(),
            previous_pairs: HashSet::new(),
        }
    }

    /// Advance the simulation by `delta_time` seconds
    pub fn update(&mut self, world: &mut World, delta_time: f32) {
        std::mem::swap(&mut self.current_pairs, &mut self.previous_pairs);
        self.current_pairs.clear();
        self.contacts.clear();

        self.apply_gravity(world, delta_time);
        Self::flush_forces(world);
        Self::integrate(world, delta_time);
        self.enforce_bounds(world);
        self.rebuild_quadtree(world);
        let nearby = self.detect_and_resolve(world);
        self.update_collision_states(world, &nearby);

        log::debug!(
            "Physics step dt={:.4}: {} colliders, {} contacts, {} entered, {} exited",
            delta_time,
            self.quadtree.entity_count(),
            self.contacts.len(),
            self.current_pairs.difference(&self.previous_pairs).count(),
            self.previous_pairs.difference(&self.current_pairs).count(),
        );
    }

    fn apply_gravity(&self, world: &mut World, delta_time: f32) {
        for entity in world.entities_with::<GravityComponent>() {
            let Some(gravity) = world.get_component::<GravityComponent>(entity).copied() else {
                continue;
            };
            if !gravity.enabled {
                continue;
            }

            let applied = self.config.gravity * gravity.multiplier;
            let Some(transform) = world.get_component_mut::<TransformComponent>(entity) else {
                continue;
            };
            transform.velocity += applied * delta_time;

            if let Some(forces) = world.get_component_mut::<ForceAccumulatorComponent>(entity) {
                forces.add_force(applied);
            }
        }
    }

    fn flush_forces(world: &mut World) {
        for entity in world.entities_with::<ForceAccumulatorComponent>() {
            if let Some(forces) = world.get_component_mut::<ForceAccumulatorComponent>(entity) {
                forces.flush();
            }
        }
    }

    fn integrate(world: &mut World, delta_time: f32) {
        for entity in world.entities_with::<TransformComponent>() {
            if let Some(transform) = world.get_component_mut::<TransformComponent>(entity) {
                transform.integrate(delta_time);
            }
        }
    }

    fn enforce_bounds(&self, world: &mut World) {
        let bounds = self.world_bounds();
        let (min, max) = (bounds.min(), bounds.max());
        let mut despawned = Vec::new();

        for entity in world.entities_with::<TransformComponent>() {
            let Some(transform) = world.get_component_mut::<TransformComponent>(entity) else {
                continue;
            };
            if bounds.contains_point(transform.position) {
                continue;
            }

            log::trace!("{:?} left the world at {:?}", entity, transform.position);
            match self.config.out_of_bounds {
                OutOfBoundsPolicy::Clamp => {
                    transform.position = clamp_components(transform.position, min, max);
                }
                OutOfBoundsPolicy::Wrap => {
                    let size = bounds.size();
                    let offset = transform.position - min;
                    transform.position = Vec2::new(
                        min.x + offset.x.rem_euclid(size.x),
                        min.y + offset.y.rem_euclid(size.y),
                    );
                }
                OutOfBoundsPolicy::Bounce => {
                    let position = transform.position;
                    let velocity = &mut transform.velocity;
                    if position.x < min.x {
                        velocity.x = velocity.x.abs();
                    } else if position.x > max.x {
                        velocity.x = -velocity.x.abs();
                    }
                    if position.y < min.y {
                        velocity.y = velocity.y.abs();
                    } else if position.y > max.y {
                        velocity.y = -velocity.y.abs();
                    }
                    transform.position = clamp_components(position, min, max);
                }
                OutOfBoundsPolicy::Despawn => despawned.push(entity),
            }
        }

        for entity in despawned {
            log::debug!("Despawning {:?}: outside world bounds", entity);
            world.destroy_entity(entity);
        }
    }

    fn rebuild_quadtree(&mut self, world: &World) {
        self.quadtree.clear();
        for (entity, collider) in world.query::<ColliderComponent>() {
            match world.get_component::<TransformComponent>(entity) {
                Some(transform) => self.quadtree.insert(entity, collider.aabb(transform.position)),
                None => log::debug!("{:?} has a collider but no transform, not indexed", entity),
            }
        }
    }

    /// Broad and narrow phase, resolving each contact as it is found
    ///
    /// Returns the layer-compatible broad-phase candidates of every entity.
    fn detect_and_resolve(&mut self, world: &mut World) -> HashMap<Entity, HashSet<Entity>> {
        let settings = self.resolution_settings();
        let mut nearby: HashMap<Entity, HashSet<Entity>> = HashMap::new();

        for entity in world.entities_with::<ColliderComponent>() {
            let Some(query_area) = Self::current_aabb(world, entity) else {
                continue;
            };

            let mut candidates = self.quadtree.query(&query_area);
            candidates.sort();
            candidates.dedup();

            for other in candidates {
                if other.id() <= entity.id() || !world.is_alive(other) {
                    continue;
                }
                if !Self::layers_allow(world, entity, other) {
                    continue;
                }

                nearby.entry(entity).or_default().insert(other);
                nearby.entry(other).or_default().insert(entity);

                let Some(manifold) = CollisionDetector::manifold_between(world, entity, other) else {
                    continue;
                };
                if !manifold.has_collision {
                    continue;
                }

                self.handle_contact(world, entity, other, manifold, &settings);
            }
        }

        nearby
    }

    fn handle_contact(
        &mut self,
        world: &mut World,
        entity_a: Entity,
        entity_b: Entity,
        manifold: CollisionManifold,
        settings: &ResolutionSettings,
    ) {
        let (Some(collider_a), Some(collider_b)) = (
            world.get_component::<ColliderComponent>(entity_a),
            world.get_component::<ColliderComponent>(entity_b),
        ) else {
            return;
        };

        let is_trigger = collider_a.is_trigger || collider_b.is_trigger;
        let both_static = collider_a.is_static && collider_b.is_static;
        let shapes = (collider_a.shape_type(), collider_b.shape_type());

        self.current_pairs.insert(CollisionPair::new(entity_a, entity_b));
        self.contacts.push(ContactEvent {
            entity_a,
            entity_b,
            is_trigger,
            manifold: manifold.clone(),
        });

        if is_trigger || both_static {
            log::trace!(
                "Contact {:?}/{:?} not resolved (trigger: {}, static: {})",
                entity_a,
                entity_b,
                is_trigger,
                both_static
            );
            return;
        }

        match shapes {
            (ShapeType::Circle, ShapeType::Circle) => {
                resolution::resolve_circle_circle(world, entity_a, entity_b, &manifold, settings);
            }
            (ShapeType::Box, ShapeType::Box) => {
                resolution::resolve_box_box(world, entity_a, entity_b, &manifold, settings);
            }
            (ShapeType::Circle, ShapeType::Box) | (ShapeType::Box, ShapeType::Circle) => {
                resolution::resolve_circle_box(world, entity_a, entity_b, &manifold, settings);
            }
        }
    }

    fn current_aabb(world: &World, entity: Entity) -> Option<AABB> {
        let collider = world.get_component::<ColliderComponent>(entity)?;
        let transform = world.get_component::<TransformComponent>(entity)?;
        Some(collider.aabb(transform.position))
    }

    fn layers_allow(world: &World, a: Entity, b: Entity) -> bool {
        match (
            world.get_component::<ColliderComponent>(a),
            world.get_component::<ColliderComponent>(b),
        ) {
            (Some(a), Some(b)) => CollisionLayers::should_collide(a.layer, a.mask, b.layer, b.mask),
            _ => false,
        }
    }

    fn update_collision_states(&self, world: &mut World, nearby: &HashMap<Entity, HashSet<Entity>>) {
        let entered = self.collision_entered();
        let exited = self.collision_exited();

        for entity in world.entities_with::<CollisionStateComponent>() {
            let Some(state) = world.get_component_mut::<CollisionStateComponent>(entity) else {
                continue;
            };
            state.clear_frame_data();

            state.colliding_with.extend(
                self.current_pairs
                    .iter()
                    .filter_map(|pair| pair.partner_of(entity)),
            );
            state
                .collision_entered
                .extend(entered.iter().filter_map(|pair| pair.partner_of(entity)));
            state
                .collision_exited
                .extend(exited.iter().filter_map(|pair| pair.partner_of(entity)));
            if let Some(neighbors) = nearby.get(&entity) {
                state.nearby_entities.extend(neighbors.iter().copied());
            }
        }
    }

    /// Pairs colliding this step but not the step before, sorted
    pub fn collision_entered(&self) -> Vec<CollisionPair> {
        let mut pairs: Vec<_> = self
            .current_pairs
            .difference(&self.previous_pairs)
            .copied()
            .collect();
        pairs.sort();
        pairs
    }

    /// Pairs colliding the step before but not this step, sorted
    pub fn collision_exited(&self) -> Vec<CollisionPair> {
        let mut pairs: Vec<_> = self
            .previous_pairs
            .difference(&self.current_pairs)
            .copied()
            .collect();
        pairs.sort();
        pairs
    }

    /// All pairs colliding during the last step
    pub fn current_collisions(&self) -> &HashSet<CollisionPair> {
        &self.current_pairs
    }

    /// Contacts of the last step, in detection order
    pub fn contacts(&self) -> &[ContactEvent] {
        &self.contacts
    }

    /// Set the global gravity acceleration
    pub fn set_global_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    /// Global gravity acceleration
    pub fn global_gravity(&self) -> Vec2 {
        self.config.gravity
    }

    /// Move or resize the world and reset the quadtree to the new bounds
    pub fn set_world_bounds(&mut self, center: Vec2, size: Vec2) -> Result<(), PhysicsError> {
        validate_world_bounds(center, size)?;
        self.config.world_center = center;
        self.config.world_size = size;
        self.quadtree.reset(self.config.world_bounds());
        Ok(())
    }

    /// Current world bounds
    pub fn world_bounds(&self) -> AABB {
        self.config.world_bounds()
    }

    /// Change what happens to bodies leaving the world
    pub fn set_out_of_bounds_policy(&mut self, policy: OutOfBoundsPolicy) {
        self.config.out_of_bounds = policy;
    }

    /// Broad-phase index as built by the last step (read-only)
    pub fn quadtree(&self) -> &Quadtree {
        &self.quadtree
    }

    /// Active configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Resolver tunables derived from the configuration
    pub fn resolution_settings(&self) -> ResolutionSettings {
        ResolutionSettings {
            correction_percent: self.config.correction_percent,
            default_restitution: self.config.default_restitution,
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
