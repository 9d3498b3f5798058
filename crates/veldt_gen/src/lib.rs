//! Veldt Gen - Procedural Chunk Generation
//!
//! Produces the contents of one terrain chunk: a noise-driven ground mesh and
//! a scatter of obstacles that keep a minimum spacing from each other.
//!
//! # Pipeline
//!
//! ```text
//!   WorldSeed ──► chunk_rng(i, j)
//!                     │
//!   NoiseHeightField ─┼──► MeshSynthesizer ──► GroundMesh ──► host.spawn_ground
//!                     │
//!   ObstacleCatalog ──┴──► ObstaclePlacer ───► PlacedObstacle ──► host.spawn_obstacle
//!                               ▲     │
//!                               └─────┘
//!                        overlap / terrain probes
//! ```
//!
//! Generation never owns scene objects. The [`TerrainHost`] trait is the seam
//! to whatever answers queries and instantiates things: a physics world in the
//! runtime, or [`MemoryHost`] in tests.
//!
//! # Example
//!
//! ```ignore
//! use veldt_gen::prelude::*;
//!
//! let field = NoiseHeightField::new(seed.noise_seed(), terrain.noise_frequency);
//! let mut rng = seed.chunk_rng(0, 0);
//! let mesh = MeshSynthesizer::new(&field, &terrain).build_chunk(origin, &mut rng);
//! let surface = host.spawn_ground(origin.with_y(0.0), &mesh, &catalog.ground);
//! let report = ObstaclePlacer::new(&placement, &catalog).place(footprint, &mut host, &mut rng);
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod host;
pub mod mesh;
pub mod noise_field;
pub mod placement;
pub mod seed;

pub mod prelude {
    //! Common imports for chunk generation
    pub use crate::catalog::{GroundTemplate, ObstacleCatalog, ObstaclePrototype, PrototypeShape};
    pub use crate::config::{PlacementConfig, TerrainConfig};
    pub use crate::error::{GenError, Result};
    pub use crate::host::{MemoryHost, ObjectId, QueryLayer, SurfaceHit, SurfaceId, TerrainHost};
    pub use crate::mesh::{GroundMesh, MeshSynthesizer};
    pub use crate::noise_field::NoiseHeightField;
    pub use crate::placement::{ObstacleKind, ObstaclePlacer, PlacedObstacle, PlacementReport};
    pub use crate::seed::WorldSeed;
}

pub use catalog::{GroundTemplate, ObstacleCatalog, ObstaclePrototype, PrototypeShape};
pub use config::{PlacementConfig, TerrainConfig};
pub use error::{GenError, Result};
pub use host::{MemoryHost, ObjectId, QueryLayer, SurfaceHit, SurfaceId, TerrainHost};
pub use mesh::{GroundMesh, MeshSynthesizer};
pub use noise_field::NoiseHeightField;
pub use placement::{ObstacleKind, ObstaclePlacer, PlacedObstacle, PlacementReport};
pub use seed::WorldSeed;
