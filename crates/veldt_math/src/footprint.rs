//! Planar square footprint of a terrain chunk

use crate::vector::{Vec2, Vec3};

/// Axis-aligned square on the X/Z plane, `[origin, origin + size]` on both axes
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Footprint {
    pub origin: Vec2,
    pub size: f32,
}

impl Footprint {
    #[inline]
    pub const fn new(origin: Vec2, size: f32) -> Self {
        Self { origin, size }
    }

    /// Minimum corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.origin
    }

    /// Maximum corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.origin + Vec2::splat(self.size)
    }

    /// Center point on the ground plane (y = 0)
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.origin + Vec2::splat(self.size * 0.5)).with_y(0.0)
    }

    /// Check if a planar point lies inside (edges inclusive)
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.origin.x && point.x <= max.x && point.z >= self.origin.z && point.z <= max.z
    }

    /// Check whether two footprints share an edge
    pub fn is_adjacent(&self, other: &Footprint) -> bool {
        let dx = (self.origin.x - other.origin.x).abs();
        let dz = (self.origin.z - other.origin.z).abs();
        (dx == self.size && dz == 0.0) || (dz == self.size && dx == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprint_bounds() {
        let fp = Footprint::new(Vec2::new(-25.0, -25.0), 50.0);
        assert_eq!(fp.max(), Vec2::new(25.0, 25.0));
        assert_eq!(fp.center(), Vec3::ZERO);
        assert!(fp.contains(Vec2::new(25.0, -25.0)));
        assert!(!fp.contains(Vec2::new(25.1, 0.0)));
    }

    #[test]
    fn test_adjacency() {
        let a = Footprint::new(Vec2::new(0.0, 0.0), 50.0);
        let b = Footprint::new(Vec2::new(50.0, 0.0), 50.0);
        let c = Footprint::new(Vec2::new(50.0, 50.0), 50.0);
        assert!(a.is_adjacent(&b));
        assert!(!a.is_adjacent(&c));
        assert!(!a.is_adjacent(&a));
    }
}
