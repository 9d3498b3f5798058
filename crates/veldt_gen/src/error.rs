//! Error types for terrain generation

use std::path::PathBuf;
use thiserror::Error;

/// Generation errors
#[derive(Debug, Error)]
pub enum GenError {
    /// Invalid configuration
    #[error("Invalid generation configuration: {0}")]
    InvalidConfig(String),

    /// Catalog has no obstacle prototypes to choose from
    #[error("Obstacle catalog has no obstacle prototypes")]
    EmptyCatalog,

    /// Two prototypes share a name
    #[error("Duplicate prototype name in catalog: {0}")]
    DuplicatePrototype(String),

    /// Prototype shape has a non-positive or non-finite dimension
    #[error("Invalid prototype {name}: {reason}")]
    InvalidPrototype { name: String, reason: String },

    /// Catalog file could not be read
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file could not be parsed
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, GenError>;
