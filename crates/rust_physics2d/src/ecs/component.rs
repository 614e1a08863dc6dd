//! Component trait and type-erased storage

use super::entity::EntityKey;
use slotmap::SecondaryMap;
use std::any::Any;

/// Marker trait for components
pub trait Component: 'static + Send + Sync {}

/// Type-erased view of one component column
///
/// Lets the world drop an entity's components without knowing their types.
pub(crate) trait ComponentColumn: Any + Send + Sync {
    fn remove_entity(&mut self, key: EntityKey);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Dense-by-slot storage for a single component type
pub(crate) struct ComponentStorage<T: Component> {
    pub(crate) components: SecondaryMap<EntityKey, T>,
}

impl<T: Component> ComponentStorage<T> {
    pub(crate) fn new() -> Self {
        Self {
            components: SecondaryMap::new(),
        }
    }
}

impl<T: Component> ComponentColumn for ComponentStorage<T> {
    fn remove_entity(&mut self, key: EntityKey) {
        self.components.remove(key);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
