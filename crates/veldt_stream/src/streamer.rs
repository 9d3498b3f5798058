//! Chunk Streamer
//!
//! Grows the terrain around the observer. Each tick probes straight down from
//! the observer: standing on a known chunk fills in its 3x3 neighbourhood,
//! standing on nothing with no chunks yet bootstraps the first chunk under
//! the observer. Chunks are never unloaded.

use veldt_gen::{
    MeshSynthesizer, NoiseHeightField, ObstacleCatalog, ObstaclePlacer, QueryLayer, TerrainHost,
};
use veldt_math::{Footprint, Vec2, Vec3};

use crate::chunk::{Chunk, GridCoord};
use crate::config::StreamingConfig;
use crate::error::{Result, StreamError};
use crate::index::ChunkIndex;

/// Which branch a tick took
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No chunks existed; the first one was generated under the observer
    Bootstrapped,
    /// The observer stood on a chunk and missing neighbours were generated
    Extended,
    /// Nothing to do
    Idle,
}

/// Result of a streaming tick
#[derive(Clone, Debug)]
pub struct TickReport {
    pub outcome: TickOutcome,
    /// Cells generated this tick, in generation order
    pub generated: Vec<GridCoord>,
    /// Obstacles abandoned during placement this tick
    pub skipped_obstacles: usize,
}

impl TickReport {
    fn idle() -> Self {
        Self {
            outcome: TickOutcome::Idle,
            generated: Vec::new(),
            skipped_obstacles: 0,
        }
    }

    /// Check if any chunks were generated
    pub fn has_updates(&self) -> bool {
        !self.generated.is_empty()
    }
}

/// Streaming statistics
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamingStats {
    pub ticks: u64,
    pub chunks_generated: usize,
    pub obstacles_placed: usize,
    pub obstacles_skipped: usize,
    pub fences_placed: usize,
}

/// Generates chunks around a moving observer
pub struct ChunkStreamer {
    config: StreamingConfig,
    catalog: ObstacleCatalog,
    field: NoiseHeightField,
    index: ChunkIndex,
    stats: StreamingStats,
}

impl ChunkStreamer {
    /// Create a streamer after validating its configuration and catalog
    pub fn new(config: StreamingConfig, catalog: ObstacleCatalog) -> Result<Self> {
        config.validate()?;
        catalog.validate()?;

        let field = NoiseHeightField::new(config.seed.noise_seed(), config.terrain.noise_frequency);
        let index = ChunkIndex::new(config.chunk_size());

        log::info!(
            "Chunk streamer ready: seed {}, chunk size {}, resolution {}",
            config.seed.0,
            config.terrain.chunk_size,
            config.terrain.grid_resolution
        );

        Ok(Self {
            config,
            catalog,
            field,
            index,
            stats: StreamingStats::default(),
        })
    }

    pub fn config(&self) -> &StreamingConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ObstacleCatalog {
        &self.catalog
    }

    pub fn index(&self) -> &ChunkIndex {
        &self.index
    }

    pub fn stats(&self) -> &StreamingStats {
        &self.stats
    }

    /// Advance streaming for the current observer position
    pub fn tick<H: TerrainHost + ?Sized>(&mut self, observer: Vec3, host: &mut H) -> Result<TickReport> {
        self.stats.ticks += 1;
        let skipped_before = self.stats.obstacles_skipped;

        let hit = host.raycast_down(observer, self.config.observer_probe_distance, QueryLayer::Terrain);
        let standing_on = hit.map(|h| (h.surface, self.index.chunk_for_surface(h.surface).map(|c| c.coord)));

        let mut report = TickReport::idle();
        match standing_on {
            Some((_, Some(center))) => {
                report.generated = self.extend_around(center, host)?;
                if report.has_updates() {
                    report.outcome = TickOutcome::Extended;
                }
            }
            Some((surface, None)) => {
                log::debug!("Observer over unregistered surface {:?}", surface);
            }
            None if self.index.is_empty() => {
                let half = self.config.chunk_size() * 0.5;
                let origin = Vec2::new(observer.x - half, observer.z - half);
                let coord = self.generate_chunk(origin, host)?.coord;
                log::info!("Bootstrapped terrain at ({}, 0, {})", origin.x, origin.z);
                report.outcome = TickOutcome::Bootstrapped;
                report.generated.push(coord);
            }
            None => {}
        }

        report.skipped_obstacles = self.stats.obstacles_skipped - skipped_before;
        Ok(report)
    }

    /// Generate every missing cell in the 3x3 block around `center`
    fn extend_around<H: TerrainHost + ?Sized>(
        &mut self,
        center: GridCoord,
        host: &mut H,
    ) -> Result<Vec<GridCoord>> {
        let mut generated = Vec::new();
        for coord in center.neighborhood() {
            if self.index.contains(coord) {
                continue;
            }
            let Some(origin) = self.index.origin_of(coord) else {
                continue;
            };
            self.generate_chunk(origin, host)?;
            generated.push(coord);
        }
        Ok(generated)
    }

    /// Generate, spawn and register the chunk whose footprint starts at `origin`
    ///
    /// The first chunk fixes the grid; later origins must be aligned to it.
    pub fn generate_chunk<H: TerrainHost + ?Sized>(&mut self, origin: Vec2, host: &mut H) -> Result<&Chunk> {
        let coord = self.index.coord_for_origin(origin)?;
        if self.index.contains(coord) {
            return Err(StreamError::DuplicateChunk(coord));
        }

        let size = self.config.chunk_size();
        let mut rng = self.config.seed.chunk_rng(coord.i, coord.j);

        let mesh = MeshSynthesizer::new(&self.field, &self.config.terrain).build_chunk(origin, &mut rng);
        let surface = host.spawn_ground(origin.with_y(0.0), &mesh, &self.catalog.ground);

        let placement = ObstaclePlacer::new(&self.config.placement, &self.catalog).place(
            Footprint::new(origin, size),
            host,
            &mut rng,
        );

        self.stats.chunks_generated += 1;
        self.stats.obstacles_placed += placement.obstacles.len();
        self.stats.obstacles_skipped += placement.skipped;
        self.stats.fences_placed += usize::from(placement.fence.is_some());

        log::debug!(
            "Generated chunk {} at ({}, {}): {} obstacles, {} skipped",
            coord,
            origin.x,
            origin.z,
            placement.obstacles.len(),
            placement.skipped
        );

        let chunk = Chunk {
            coord,
            origin: origin.with_y(0.0),
            size,
            surface,
            mesh,
            obstacles: placement.into_instances(),
        };
        self.index.insert(chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veldt_gen::{MemoryHost, PlacementConfig};

    fn streamer() -> ChunkStreamer {
        let config = StreamingConfig::default()
            .with_seed(17u64)
            .with_placement(PlacementConfig::default().with_obstacle_count(2, 4));
        ChunkStreamer::new(config, ObstacleCatalog::default()).unwrap()
    }

    #[test]
    fn test_bootstrap_under_observer() {
        let mut streamer = streamer();
        let mut host = MemoryHost::new();

        let report = streamer.tick(Vec3::new(0.0, 1.0, 0.0), &mut host).unwrap();
        assert_eq!(report.outcome, TickOutcome::Bootstrapped);
        assert_eq!(report.generated, vec![GridCoord::ORIGIN]);
        assert_eq!(streamer.index().len(), 1);
        assert!(streamer.index().exists(Vec2::new(-25.0, -25.0)));
        assert_eq!(host.ground_count(), 1);
    }

    #[test]
    fn test_second_tick_fills_neighbourhood() {
        let mut streamer = streamer();
        let mut host = MemoryHost::new();
        let observer = Vec3::new(0.0, 5.0, 0.0);

        streamer.tick(observer, &mut host).unwrap();
        let report = streamer.tick(observer, &mut host).unwrap();
        assert_eq!(report.outcome, TickOutcome::Extended);
        assert_eq!(report.generated.len(), 8);
        assert_eq!(streamer.index().len(), 9);

        let report = streamer.tick(observer, &mut host).unwrap();
        assert_eq!(report.outcome, TickOutcome::Idle);
        assert_eq!(streamer.stats().ticks, 3);
        assert_eq!(streamer.stats().chunks_generated, 9);
    }

    #[test]
    fn test_miss_with_existing_chunks_is_idle() {
        let mut streamer = streamer();
        let mut host = MemoryHost::new();
        streamer.tick(Vec3::new(0.0, 5.0, 0.0), &mut host).unwrap();

        let report = streamer.tick(Vec3::new(1000.0, 5.0, 1000.0), &mut host).unwrap();
        assert_eq!(report.outcome, TickOutcome::Idle);
        assert_eq!(streamer.index().len(), 1);
    }

    #[test]
    fn test_duplicate_generate_rejected() {
        let mut streamer = streamer();
        let mut host = MemoryHost::new();
        streamer.generate_chunk(Vec2::ZERO, &mut host).unwrap();
        assert!(matches!(
            streamer.generate_chunk(Vec2::ZERO, &mut host),
            Err(StreamError::DuplicateChunk(_))
        ));
        assert_eq!(host.ground_count(), 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = StreamingConfig::default()
            .with_placement(PlacementConfig::default().with_max_attempts(0));
        assert!(ChunkStreamer::new(config, ObstacleCatalog::default()).is_err());
    }
}
