//! Collision layers and filtering

use serde::{Deserialize, Serialize};

/// A collision layer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionLayer(pub u32);

impl CollisionLayer {
    /// Chunk ground surfaces
    pub const TERRAIN: Self = Self(0);
    /// Placed obstacles and fence lines
    pub const OBSTACLES: Self = Self(1);
    /// The moving observer
    pub const OBSERVER: Self = Self(2);

    /// Get the layer as a bitmask
    pub fn as_mask(&self) -> u32 {
        1 << self.0
    }
}

impl Default for CollisionLayer {
    fn default() -> Self {
        Self::TERRAIN
    }
}

/// Collision groups for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionGroups {
    /// Which groups this object belongs to (membership)
    pub memberships: u32,
    /// Which groups this object can collide with (filter)
    pub filter: u32,
}

impl CollisionGroups {
    /// Collide with everything
    pub const ALL: Self = Self {
        memberships: u32::MAX,
        filter: u32::MAX,
    };

    /// Collide with nothing
    pub const NONE: Self = Self {
        memberships: 0,
        filter: 0,
    };

    pub fn new(memberships: u32, filter: u32) -> Self {
        Self { memberships, filter }
    }

    /// Create from a single layer that collides with specific layers
    pub fn from_layer(layer: CollisionLayer, collides_with: &[CollisionLayer]) -> Self {
        let memberships = layer.as_mask();
        let filter = collides_with.iter().fold(0u32, |acc, l| acc | l.as_mask());
        Self { memberships, filter }
    }

    /// Groups for a query that only sees the given layers
    pub fn query(layers: &[CollisionLayer]) -> Self {
        let filter = layers.iter().fold(0u32, |acc, l| acc | l.as_mask());
        Self {
            memberships: u32::MAX,
            filter,
        }
    }

    /// Static terrain: hit by everything
    pub fn terrain() -> Self {
        Self::new(CollisionLayer::TERRAIN.as_mask(), u32::MAX)
    }

    /// Static obstacles: hit by everything
    pub fn obstacles() -> Self {
        Self::new(CollisionLayer::OBSTACLES.as_mask(), u32::MAX)
    }

    /// Check if two groups can collide
    pub fn can_collide(&self, other: &CollisionGroups) -> bool {
        (self.memberships & other.filter) != 0 && (other.memberships & self.filter) != 0
    }

    /// Add a layer to filter
    pub fn add_filter(mut self, layer: CollisionLayer) -> Self {
        self.filter |= layer.as_mask();
        self
    }

    /// Remove a layer from filter
    pub fn remove_filter(mut self, layer: CollisionLayer) -> Self {
        self.filter &= !layer.as_mask();
        self
    }
}

impl Default for CollisionGroups {
    fn default() -> Self {
        Self::ALL
    }
}
