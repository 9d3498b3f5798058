//! Streaming configuration

use serde::{Deserialize, Serialize};
use veldt_gen::{PlacementConfig, TerrainConfig, WorldSeed};

use crate::error::{Result, StreamError};

/// Configuration for the chunk streamer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// World seed every chunk generator derives from
    pub seed: WorldSeed,

    /// Maximum length of the probe cast down from the observer
    pub observer_probe_distance: f32,

    /// Ground mesh settings
    pub terrain: TerrainConfig,

    /// Obstacle placement settings
    pub placement: PlacementConfig,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            seed: WorldSeed::default(),
            observer_probe_distance: 100.0,
            terrain: TerrainConfig::default(),
            placement: PlacementConfig::default(),
        }
    }
}

impl StreamingConfig {
    /// Set the world seed
    pub fn with_seed(mut self, seed: impl Into<WorldSeed>) -> Self {
        self.seed = seed.into();
        self
    }

    /// Set terrain settings
    pub fn with_terrain(mut self, terrain: TerrainConfig) -> Self {
        self.terrain = terrain;
        self
    }

    /// Set placement settings
    pub fn with_placement(mut self, placement: PlacementConfig) -> Self {
        self.placement = placement;
        self
    }

    pub fn chunk_size(&self) -> f32 {
        self.terrain.chunk_size
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.observer_probe_distance > 0.0) {
            return Err(StreamError::InvalidConfig(
                "observer_probe_distance must be positive".into(),
            ));
        }
        self.terrain.validate()?;
        self.placement.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = StreamingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_size(), 50.0);
    }

    #[test]
    fn test_nested_errors_propagate() {
        let config = StreamingConfig::default()
            .with_terrain(TerrainConfig::default().with_grid_resolution(0));
        assert!(matches!(config.validate(), Err(StreamError::Gen(_))));

        let mut config = StreamingConfig::default();
        config.observer_probe_distance = 0.0;
        assert!(matches!(config.validate(), Err(StreamError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_toml() {
        let config: StreamingConfig = toml::from_str(
            r#"
            seed = 99

            [terrain]
            chunk_size = 32.0

            [placement]
            fence_probability = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, WorldSeed::new(99));
        assert_eq!(config.terrain.chunk_size, 32.0);
        assert_eq!(config.terrain.grid_resolution, 10);
        assert_eq!(config.placement.fence_probability, 0.25);
        assert_eq!(config.observer_probe_distance, 100.0);
    }
}
