//! Boot Configuration
//!
//! Everything the headless runtime needs before the first tick: streaming
//! and physics settings, the observer's walk, how long to simulate and which
//! obstacle catalog to load.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Path given on the command line
//! 2. Environment variable: `VELDT_CONFIG=/path/to/veldt.toml`
//! 3. `veldt.toml` in the working directory
//! 4. Built-in defaults
//!
//! Individual values can then be overridden with `VELDT_SEED`,
//! `VELDT_TICKS` and `VELDT_CATALOG`.
//!
//! # Example Config File
//!
//! ```toml
//! catalog_path = "assets/catalog.toml"
//!
//! [simulation]
//! ticks = 600        # 0 runs until Ctrl-C
//! timestep = 0.016
//!
//! [streaming]
//! seed = 1234
//!
//! [streaming.terrain]
//! chunk_size = 50.0
//! grid_resolution = 20
//!
//! [streaming.placement]
//! clearance_radius = 4.0
//! fence_probability = 0.1
//!
//! [observer]
//! speed = 5.0
//! walk_direction = { x = 1.0, z = 0.3 }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use veldt_gen::ObstacleCatalog;
use veldt_physics::PhysicsConfig;
use veldt_stream::StreamingConfig;

use crate::error::{Result, RuntimeError};
use crate::observer::ObserverConfig;

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "veldt.toml";

/// Simulation loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of ticks to run, 0 to run until interrupted
    pub ticks: u64,
    /// Seconds per tick
    pub timestep: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks: 0,
            timestep: 1.0 / 60.0,
        }
    }
}

/// Complete boot configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    /// Chunk streaming and generation
    pub streaming: StreamingConfig,
    /// Collision world
    pub physics: PhysicsConfig,
    /// The walking observer
    pub observer: ObserverConfig,
    /// Loop settings
    pub simulation: SimulationConfig,
    /// Obstacle catalog file, built-in catalog when unset
    pub catalog_path: Option<PathBuf>,
    /// Config file path (for reloading)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl BootConfig {
    /// Load boot configuration from all sources
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var_os("VELDT_CONFIG").map(PathBuf::from);
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);

        let mut config = if let Some(path) = explicit.map(Path::to_path_buf).or(env_path) {
            // A named file has to exist
            Self::load_from_file(&path)?
        } else if local.exists() {
            Self::load_from_file(&local)?
        } else {
            log::info!("No config file found, using defaults");
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| RuntimeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_toml_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        log::info!("Loaded boot config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `VELDT_*` overrides; unparsable values are ignored with a warning
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup("VELDT_SEED") {
            match seed.trim().parse::<u64>() {
                Ok(seed) => {
                    self.streaming.seed = seed.into();
                    log::info!("Seed from env: {}", seed);
                }
                Err(_) => log::warn!("Ignoring VELDT_SEED={:?}: not an unsigned integer", seed),
            }
        }

        if let Some(ticks) = lookup("VELDT_TICKS") {
            match ticks.trim().parse::<u64>() {
                Ok(ticks) => self.simulation.ticks = ticks,
                Err(_) => log::warn!("Ignoring VELDT_TICKS={:?}: not an unsigned integer", ticks),
            }
        }

        if let Some(catalog) = lookup("VELDT_CATALOG") {
            if !catalog.is_empty() {
                self.catalog_path = Some(PathBuf::from(catalog));
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.streaming.validate()?;
        self.physics.validate()?;
        self.observer.validate()?;
        if !(self.simulation.timestep > 0.0) {
            return Err(RuntimeError::InvalidConfig("timestep must be positive".into()));
        }
        Ok(())
    }

    /// Load the obstacle catalog
    ///
    /// Without a configured path the built-in catalog is used. A configured
    /// file that does not exist falls back to the built-in catalog with a
    /// warning; one that exists but does not parse is an error.
    pub fn load_catalog(&self) -> Result<ObstacleCatalog> {
        let Some(path) = &self.catalog_path else {
            return Ok(ObstacleCatalog::default());
        };

        if !path.exists() {
            log::warn!(
                "Catalog {} not found, using the built-in catalog",
                path.display()
            );
            return Ok(ObstacleCatalog::default());
        }

        Ok(ObstacleCatalog::load(path)?)
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        let terrain = &self.streaming.terrain;
        let placement = &self.streaming.placement;

        log::info!("Boot Configuration:");
        if let Some(path) = &self.config_path {
            log::info!("  Config: {}", path.display());
        }
        log::info!("  Seed: {}", self.streaming.seed.0);
        log::info!(
            "  Chunks: {}m, {}x{} cells, amplitude {}..{}",
            terrain.chunk_size,
            terrain.grid_resolution,
            terrain.grid_resolution,
            terrain.amplitude_min,
            terrain.amplitude_max
        );
        log::info!(
            "  Obstacles: {}..{} per chunk, clearance {}m, fence chance {}",
            placement.obstacle_count_min,
            placement.obstacle_count_max,
            placement.clearance_radius,
            placement.fence_probability
        );
        match &self.catalog_path {
            Some(path) => log::info!("  Catalog: {}", path.display()),
            None => log::info!("  Catalog: built-in"),
        }
        if self.simulation.ticks == 0 {
            log::info!("  Ticks: until interrupted");
        } else {
            log::info!("  Ticks: {}", self.simulation.ticks);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = BootConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.simulation.ticks, 0);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_parse_partial_file() {
        let config = BootConfig::from_toml_str(
            r#"
            catalog_path = "assets/catalog.toml"

            [simulation]
            ticks = 120

            [streaming]
            seed = 99

            [streaming.terrain]
            chunk_size = 32.0
            "#,
        )
        .unwrap();

        assert_eq!(config.simulation.ticks, 120);
        assert_eq!(config.streaming.seed.0, 99);
        assert_eq!(config.streaming.chunk_size(), 32.0);
        assert_eq!(config.catalog_path, Some(PathBuf::from("assets/catalog.toml")));
        // Untouched sections keep their defaults
        assert_eq!(config.physics.gravity, [0.0, -9.81, 0.0]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            BootConfig::from_toml_str("[simulation]\nticks = \"many\""),
            Err(RuntimeError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = BootConfig::load_from_file(Path::new("/nonexistent/veldt.toml")).unwrap_err();
        assert!(matches!(err, RuntimeError::Io { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = BootConfig::default();
        config.apply_overrides(env(&[
            ("VELDT_SEED", "42"),
            ("VELDT_TICKS", "300"),
            ("VELDT_CATALOG", "rocks.toml"),
        ]));

        assert_eq!(config.streaming.seed.0, 42);
        assert_eq!(config.simulation.ticks, 300);
        assert_eq!(config.catalog_path, Some(PathBuf::from("rocks.toml")));
    }

    #[test]
    fn test_bad_env_override_ignored() {
        let mut config = BootConfig::default();
        config.apply_overrides(env(&[("VELDT_SEED", "-3"), ("VELDT_TICKS", "soon")]));
        assert_eq!(config.streaming.seed.0, 0);
        assert_eq!(config.simulation.ticks, 0);
    }

    #[test]
    fn test_invalid_timestep() {
        let mut config = BootConfig::default();
        config.simulation.timestep = 0.0;
        assert!(matches!(config.validate(), Err(RuntimeError::InvalidConfig(_))));
    }

    #[test]
    fn test_catalog_fallbacks() {
        let config = BootConfig::default();
        assert_eq!(config.load_catalog().unwrap(), ObstacleCatalog::default());

        let missing = BootConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/catalog.toml")),
            ..Default::default()
        };
        assert_eq!(missing.load_catalog().unwrap(), ObstacleCatalog::default());
    }

    #[test]
    fn test_malformed_catalog_is_error() {
        let path = std::env::temp_dir().join(format!("veldt_bad_catalog_{}.toml", std::process::id()));
        std::fs::write(&path, "obstacles = 3").unwrap();

        let config = BootConfig {
            catalog_path: Some(path.clone()),
            ..Default::default()
        };
        let result = config.load_catalog();
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(RuntimeError::Gen(_))));
    }
}
