//! # Veldt Runtime
//!
//! Headless runtime that streams terrain around an observer walking across
//! it. Collision, ground probes and obstacle overlap tests are answered by
//! the Rapier world in `veldt_physics`.
//!
//! ## Loop
//!
//! ```text
//! ┌──────────────┐  position   ┌───────────────┐  spawn ground/obstacles
//! │   Observer   │────────────►│ ChunkStreamer │───────────────┐
//! └──────▲───────┘             └───────┬───────┘               ▼
//!        │ move_character              │ raycast / overlap ┌─────────────┐
//!        └─────────────────────────────┴──────────────────►│ PhysicsHost │
//!                                                          └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use veldt_runtime::prelude::*;
//!
//! let config = BootConfig::load(None)?;
//! let mut sim = Simulation::new(&config)?;
//! for _ in 0..600 {
//!     sim.step()?;
//! }
//! println!("{} chunks", sim.streamer().index().len());
//! ```

pub mod boot_config;
pub mod error;
pub mod host;
pub mod observer;

pub mod prelude {
    //! Common imports for running a simulation
    pub use crate::boot_config::{BootConfig, SimulationConfig};
    pub use crate::error::{Result, RuntimeError};
    pub use crate::host::PhysicsHost;
    pub use crate::observer::{Observer, ObserverConfig};
    pub use crate::Simulation;
}

pub use boot_config::{BootConfig, SimulationConfig};
pub use error::{Result, RuntimeError};
pub use host::PhysicsHost;
pub use observer::{Observer, ObserverConfig};

use std::sync::atomic::{AtomicBool, Ordering};

use veldt_gen::ObstacleCatalog;
use veldt_stream::{ChunkStreamer, TickReport};

/// Streamer, collision world and observer stepped together
pub struct Simulation {
    streamer: ChunkStreamer,
    host: PhysicsHost,
    observer: Observer,
    timestep: f32,
}

impl Simulation {
    pub fn new(config: &BootConfig) -> Result<Self> {
        config.validate()?;
        let catalog = config.load_catalog()?;
        Self::with_catalog(config, catalog)
    }

    /// Build a simulation with an already loaded obstacle catalog, ignoring
    /// any catalog path in `config`
    pub fn with_catalog(config: &BootConfig, catalog: ObstacleCatalog) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            streamer: ChunkStreamer::new(config.streaming.clone(), catalog)?,
            host: PhysicsHost::new(config.physics.clone())?,
            observer: Observer::new(config.observer.clone()),
            timestep: config.simulation.timestep,
        })
    }

    pub fn streamer(&self) -> &ChunkStreamer {
        &self.streamer
    }

    pub fn host(&self) -> &PhysicsHost {
        &self.host
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    /// Stream around the observer's current position, then move it
    pub fn step(&mut self) -> Result<TickReport> {
        let report = self.streamer.tick(self.observer.position(), &mut self.host)?;
        if report.has_updates() {
            log::info!(
                "{:?} {} chunk(s) around ({:.1}, {:.1}, {:.1}), {} total",
                report.outcome,
                report.generated.len(),
                self.observer.position().x,
                self.observer.position().y,
                self.observer.position().z,
                self.streamer.index().len()
            );
        }
        self.observer.step(self.host.world(), self.timestep)?;
        Ok(report)
    }

    /// Step until `ticks` have run (0 = no limit) or `stop` is raised
    pub fn run(&mut self, ticks: u64, stop: &AtomicBool) -> Result<u64> {
        let mut ran = 0;
        while (ticks == 0 || ran < ticks) && !stop.load(Ordering::Relaxed) {
            self.step()?;
            ran += 1;
        }
        Ok(ran)
    }
}
