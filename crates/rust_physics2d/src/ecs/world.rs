//! ECS World implementation

use super::component::{ComponentColumn, ComponentStorage};
use super::entity::{Entity, EntityKey};
use super::Component;
use slotmap::SlotMap;
use std::any::TypeId;
use std::collections::HashMap;

/// ECS World containing all entities and components
pub struct World {
    entities: SlotMap<EntityKey, ()>,
    component_storages: HashMap<TypeId, Box<dyn ComponentColumn>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            component_storages: HashMap::new(),
        }
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        Entity::from_key(self.entities.insert(()))
    }

    /// Destroy an entity and drop all of its components
    ///
    /// Returns `false` if the handle was already stale.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if self.entities.remove(entity.key()).is_none() {
            return false;
        }
        for storage in self.component_storages.values_mut() {
            storage.remove_entity(entity.key());
        }
        true
    }

    /// Check whether a handle still refers to a live entity
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity.key())
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Add a component to an entity, replacing any previous one of the same type
    ///
    /// Returns `false` (and drops the component) if the entity is not alive.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> bool {
        if !self.is_alive(entity) {
            log::warn!("add_component on dead entity {:?}", entity);
            return false;
        }
        self.storage_mut::<T>()
            .components
            .insert(entity.key(), component);
        true
    }

    /// Remove a component from an entity
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.component_storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any_mut().downcast_mut::<ComponentStorage<T>>())
            .and_then(|storage| storage.components.remove(entity.key()))
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.storage::<T>()
            .and_then(|storage| storage.components.get(entity.key()))
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.component_storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any_mut().downcast_mut::<ComponentStorage<T>>())
            .and_then(|storage| storage.components.get_mut(entity.key()))
    }

    /// Check whether an entity carries a component
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.get_component::<T>(entity).is_some()
    }

    /// All live entities carrying `T`, sorted by id
    ///
    /// The order is stable for a given world state, which the physics step
    /// relies on for pair deduplication.
    pub fn entities_with<T: Component>(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self
            .storage::<T>()
            .map(|storage| {
                storage
                    .components
                    .keys()
                    .filter(|key| self.entities.contains_key(*key))
                    .map(Entity::from_key)
                    .collect()
            })
            .unwrap_or_default();
        entities.sort_unstable();
        entities
    }

    /// Query all entities carrying `T` together with the component
    pub fn query<T: Component>(&self) -> Vec<(Entity, &T)> {
        let mut results: Vec<(Entity, &T)> = self
            .storage::<T>()
            .map(|storage| {
                storage
                    .components
                    .iter()
                    .filter(|(key, _)| self.entities.contains_key(*key))
                    .map(|(key, component)| (Entity::from_key(key), component))
                    .collect()
            })
            .unwrap_or_default();
        results.sort_unstable_by_key(|(entity, _)| *entity);
        results
    }

    /// Get an iterator over all live entities
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys().map(Entity::from_key)
    }

    fn storage<T: Component>(&self) -> Option<&ComponentStorage<T>> {
        self.component_storages
            .get(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any().downcast_ref::<ComponentStorage<T>>())
    }

    fn storage_mut<T: Component>(&mut self) -> &mut ComponentStorage<T> {
        self.component_storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(ComponentStorage::<T>::new()))
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()
            .expect("component storage registered under a foreign TypeId")
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
