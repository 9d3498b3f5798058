//! # veldt_math - terrain math primitives
//!
//! Small vector types and the planar footprint used to describe chunk tiles.
//! World space is Y-up; the terrain grid lives on the X/Z plane.

pub mod vector;
pub mod footprint;

pub use vector::*;
pub use footprint::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const DEG_TO_RAD: f32 = PI / 180.0;
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Convert degrees to radians
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * consts::DEG_TO_RAD
}

/// Convert radians to degrees
#[inline]
pub fn degrees(radians: f32) -> f32 {
    radians * consts::RAD_TO_DEG
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub mod prelude {
    pub use crate::vector::{Vec2, Vec3};
    pub use crate::footprint::Footprint;
    pub use crate::{radians, degrees, lerp};
}
