//! Veldt Stream - Chunk Streaming
//!
//! Keeps terrain generated around a moving observer:
//! - Chunks keyed by integer grid cells anchored at the first chunk
//! - Bootstrap of the first chunk under the observer
//! - 3x3 neighbourhood fill whenever the observer stands on a known chunk
//!
//! Chunks are created once and kept for the lifetime of the streamer.
//!
//! # Example
//!
//! ```ignore
//! use veldt_stream::prelude::*;
//!
//! let mut streamer = ChunkStreamer::new(StreamingConfig::default(), ObstacleCatalog::default())?;
//!
//! // Once per frame
//! let report = streamer.tick(observer_position, &mut host)?;
//! for coord in &report.generated {
//!     log::debug!("new chunk at {}", coord);
//! }
//! ```

pub mod chunk;
pub mod config;
pub mod error;
pub mod index;
pub mod streamer;

pub mod prelude {
    //! Common imports for chunk streaming
    pub use crate::chunk::{Chunk, GridCoord};
    pub use crate::config::StreamingConfig;
    pub use crate::error::{Result, StreamError};
    pub use crate::index::ChunkIndex;
    pub use crate::streamer::{ChunkStreamer, StreamingStats, TickOutcome, TickReport};
    pub use veldt_gen::{ObstacleCatalog, TerrainHost};
}

pub use chunk::{Chunk, GridCoord};
pub use config::StreamingConfig;
pub use error::{Result, StreamError};
pub use index::ChunkIndex;
pub use streamer::{ChunkStreamer, StreamingStats, TickOutcome, TickReport};
