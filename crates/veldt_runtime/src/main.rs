//! Veldt headless runtime
//!
//! Walks an observer across procedurally streamed terrain and reports what
//! was generated.
//!
//! Run with: cargo run -p veldt_runtime -- [config.toml]
//!       or: VELDT_SEED=7 VELDT_TICKS=600 cargo run --bin veldt

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use veldt_runtime::{BootConfig, Result, Simulation};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("Runtime failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // First non-flag argument is the config path
    let config_arg = std::env::args()
        .skip(1)
        .find(|arg| !arg.starts_with("--"))
        .map(PathBuf::from);

    let config = BootConfig::load(config_arg.as_deref())?;
    config.print_summary();

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        if let Err(e) = ctrlc::set_handler(move || {
            log::info!("Received Ctrl+C, shutting down...");
            stop.store(true, Ordering::Relaxed);
        }) {
            log::warn!("Could not install Ctrl+C handler: {}", e);
        }
    }

    let mut sim = Simulation::new(&config)?;
    let ticks = sim.run(config.simulation.ticks, &stop)?;

    let stats = sim.streamer().stats();
    let observer = sim.observer().position();
    log::info!("Simulation finished after {} ticks", ticks);
    log::info!(
        "  Chunks: {} ({} colliders)",
        stats.chunks_generated,
        sim.host().world().collider_count()
    );
    log::info!(
        "  Obstacles: {} placed, {} skipped, {} fences",
        stats.obstacles_placed,
        stats.obstacles_skipped,
        stats.fences_placed
    );
    log::info!(
        "  Observer: ({:.1}, {:.1}, {:.1}), walked {:.1}m",
        observer.x,
        observer.y,
        observer.z,
        sim.observer().distance_walked()
    );
    Ok(())
}
