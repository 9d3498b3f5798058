//! Smooth height noise over the ground plane

use noise::{NoiseFn, Perlin};

/// Pure 2D height function returning values in `[0, 1]`
///
/// The field itself is deterministic in `(x, z)`; roughness comes from the
/// per-vertex amplitude the mesh synthesizer multiplies in.
#[derive(Clone)]
pub struct NoiseHeightField {
    perlin: Perlin,
    frequency: f64,
}

impl NoiseHeightField {
    pub fn new(seed: u32, frequency: f64) -> Self {
        Self {
            perlin: Perlin::new(seed),
            frequency,
        }
    }

    /// Sample the field at a world-space planar position
    pub fn sample(&self, x: f32, z: f32) -> f32 {
        let value = self
            .perlin
            .get([x as f64 * self.frequency, z as f64 * self.frequency]);
        (((value + 1.0) * 0.5) as f32).clamp(0.0, 1.0)
    }
}

impl std::fmt::Debug for NoiseHeightField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseHeightField")
            .field("frequency", &self.frequency)
            .finish_non_exhaustive()
    }
}
