//! Error types for chunk streaming

use thiserror::Error;

use crate::chunk::GridCoord;

/// Streaming errors
#[derive(Debug, Error)]
pub enum StreamError {
    /// A chunk already occupies this grid cell
    #[error("Chunk already exists at cell {0}")]
    DuplicateChunk(GridCoord),

    /// Origin does not sit on the chunk grid
    #[error("Chunk origin ({x}, {z}) is not aligned to the chunk grid")]
    Misaligned { x: f32, z: f32 },

    /// Invalid configuration
    #[error("Invalid streaming configuration: {0}")]
    InvalidConfig(String),

    /// Generation error
    #[error(transparent)]
    Gen(#[from] veldt_gen::GenError),
}

/// Result type for streaming operations
pub type Result<T> = std::result::Result<T, StreamError>;
