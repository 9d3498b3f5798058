//! Generation configuration

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

/// Terrain mesh configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Number of grid cells along each chunk edge
    pub grid_resolution: u32,

    /// Chunk side length in world units
    pub chunk_size: f32,

    /// Spatial frequency of the height noise
    pub noise_frequency: f64,

    /// Lower bound of the per-vertex amplitude draw
    pub amplitude_min: f32,

    /// Upper bound (exclusive) of the per-vertex amplitude draw
    pub amplitude_max: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            grid_resolution: 10,
            chunk_size: 50.0,
            noise_frequency: 0.1,
            amplitude_min: -2.0,
            amplitude_max: 2.0,
        }
    }
}

impl TerrainConfig {
    /// Set grid resolution
    pub fn with_grid_resolution(mut self, resolution: u32) -> Self {
        self.grid_resolution = resolution;
        self
    }

    /// Set chunk size
    pub fn with_chunk_size(mut self, size: f32) -> Self {
        self.chunk_size = size;
        self
    }

    /// Set the amplitude range
    pub fn with_amplitude(mut self, min: f32, max: f32) -> Self {
        self.amplitude_min = min;
        self.amplitude_max = max;
        self
    }

    /// Check the configuration for values the synthesizer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.grid_resolution == 0 {
            return Err(GenError::InvalidConfig("grid_resolution must be at least 1".into()));
        }
        if !(self.chunk_size > 0.0) || !self.chunk_size.is_finite() {
            return Err(GenError::InvalidConfig(format!(
                "chunk_size must be positive, got {}",
                self.chunk_size
            )));
        }
        if !(self.amplitude_min < self.amplitude_max) {
            return Err(GenError::InvalidConfig(format!(
                "amplitude range [{}, {}) is empty",
                self.amplitude_min, self.amplitude_max
            )));
        }
        if !(self.noise_frequency > 0.0) {
            return Err(GenError::InvalidConfig("noise_frequency must be positive".into()));
        }
        Ok(())
    }
}

/// Obstacle placement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Minimum obstacles per chunk (inclusive)
    pub obstacle_count_min: u32,

    /// Maximum obstacles per chunk (exclusive)
    pub obstacle_count_max: u32,

    /// Minimum distance between any two obstacles
    pub clearance_radius: f32,

    /// Chance of a fence line per chunk, in `[0, 1]`
    pub fence_probability: f64,

    /// Candidate positions tried per obstacle before giving up
    pub max_attempts: u32,

    /// Height above the candidate the terrain probe starts from
    pub probe_height: f32,

    /// Maximum length of the terrain probe
    pub probe_distance: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            obstacle_count_min: 20,
            obstacle_count_max: 40,
            clearance_radius: 4.0,
            fence_probability: 0.1,
            max_attempts: 64,
            probe_height: 10.0,
            probe_distance: 100.0,
        }
    }
}

impl PlacementConfig {
    /// Set the obstacle count range `[min, max)`
    pub fn with_obstacle_count(mut self, min: u32, max: u32) -> Self {
        self.obstacle_count_min = min;
        self.obstacle_count_max = max;
        self
    }

    /// Set the clearance radius
    pub fn with_clearance_radius(mut self, radius: f32) -> Self {
        self.clearance_radius = radius;
        self
    }

    /// Set the fence probability
    pub fn with_fence_probability(mut self, probability: f64) -> Self {
        self.fence_probability = probability;
        self
    }

    /// Set the retry bound
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Check the configuration for values the placer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.obstacle_count_min >= self.obstacle_count_max {
            return Err(GenError::InvalidConfig(format!(
                "obstacle count range [{}, {}) is empty",
                self.obstacle_count_min, self.obstacle_count_max
            )));
        }
        if self.clearance_radius < 0.0 {
            return Err(GenError::InvalidConfig("clearance_radius must not be negative".into()));
        }
        if !(0.0..=1.0).contains(&self.fence_probability) {
            return Err(GenError::InvalidConfig(format!(
                "fence_probability must be within [0, 1], got {}",
                self.fence_probability
            )));
        }
        if self.max_attempts == 0 {
            return Err(GenError::InvalidConfig("max_attempts must be at least 1".into()));
        }
        if !(self.probe_distance > 0.0) {
            return Err(GenError::InvalidConfig("probe_distance must be positive".into()));
        }
        Ok(())
    }
}
