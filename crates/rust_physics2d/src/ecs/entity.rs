//! Entity implementation
//!
//! Entities are generational handles: a slot index plus a generation
//! counter. A handle whose slot was freed and reused no longer resolves.

use std::cmp::Ordering;
use std::fmt;

slotmap::new_key_type! {
    /// Slot map key backing an [`Entity`]
    pub struct EntityKey;
}

/// Entity identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    key: EntityKey,
}

impl Entity {
    pub(crate) fn from_key(key: EntityKey) -> Self {
        Self { key }
    }

    /// Build a handle from a raw slot index and generation
    ///
    /// Handles built this way resolve only if the world holds a live entity
    /// at that exact slot and generation. Live generations are always odd, so
    /// an even `generation` is rounded up to the next odd value; only values
    /// returned by [`generation`](Self::generation) round-trip unchanged.
    pub fn new(id: u32, generation: u32) -> Self {
        let ffi = (u64::from(generation) << 32) | u64::from(id);
        Self {
            key: slotmap::KeyData::from_ffi(ffi).into(),
        }
    }

    pub(crate) fn key(self) -> EntityKey {
        self.key
    }

    /// Get the entity ID (slot index)
    ///
    /// Unique among live entities and totally ordered.
    pub fn id(&self) -> u32 {
        (slotmap::Key::data(&self.key).as_ffi() & 0xFFFF_FFFF) as u32
    }

    /// Generation of the slot this handle refers to
    pub fn generation(&self) -> u32 {
        (slotmap::Key::data(&self.key).as_ffi() >> 32) as u32
    }
}

impl Ord for Entity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id()
            .cmp(&other.id())
            .then_with(|| self.generation().cmp(&other.generation()))
    }
}

impl PartialOrd for Entity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.id(), self.generation())
    }
}
