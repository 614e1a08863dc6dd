//! Entity-Component-System implementation
//!
//! A small generational-handle entity store. The physics step only needs to
//! enumerate entities carrying a component and read/write components by
//! handle.

pub mod world;
pub mod entity;
pub mod component;
pub mod components;

pub use world::World;
pub use entity::Entity;
pub use component::Component;
