//! Collision layer system for filtering collision detection
//!
//! Each collider sits on one or more layers and carries a mask of the
//! layers it is willing to touch. A pair is tested only when each side's
//! layer is in the other's mask.

use bitflags::bitflags;

bitflags! {
    /// Collision layer bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayers: u32 {
        /// Player-controlled bodies
        const PLAYER = 1 << 0;
        /// Hostile bodies
        const ENEMY = 1 << 1;
        /// Projectiles (bullets, missiles, etc.)
        const PROJECTILE = 1 << 2;
        /// Static level geometry
        const ENVIRONMENT = 1 << 3;
        /// Trigger volumes
        const TRIGGER = 1 << 4;
        /// Debris and small props
        const DEBRIS = 1 << 5;
        /// Pickups and collectibles
        const PICKUP = 1 << 6;

        // Bits 7-31 are free for game-defined layers.
        const _ = !0;
    }
}

impl CollisionLayers {
    /// Every layer
    pub const ALL_LAYERS: Self = Self::from_bits_retain(u32::MAX);

    /// Check if two colliders should collide based on their layers and masks
    ///
    /// A's layer must be in B's mask and B's layer must be in A's mask.
    pub fn should_collide(layer_a: Self, mask_a: Self, layer_b: Self, mask_b: Self) -> bool {
        layer_a.intersects(mask_b) && layer_b.intersects(mask_a)
    }

    /// Layer for a custom bit in 7..32
    pub fn custom(bit: u32) -> Self {
        Self::from_bits_retain(1u32 << bit.min(31))
    }
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self::ALL_LAYERS
    }
}
