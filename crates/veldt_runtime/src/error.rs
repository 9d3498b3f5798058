//! Error types for the runtime

use std::path::PathBuf;
use thiserror::Error;

/// Runtime errors
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Boot configuration file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Boot configuration file could not be parsed
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Invalid configuration
    #[error("Invalid runtime configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Gen(#[from] veldt_gen::GenError),

    #[error(transparent)]
    Stream(#[from] veldt_stream::StreamError),

    #[error(transparent)]
    Physics(#[from] veldt_physics::PhysicsError),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
