#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Dimension Shooter sessions headlessly.

mod autopilot;
mod config;
mod headless;
mod simulation;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{config::SessionConfig, simulation::Simulation};

/// Runs a scripted Dimension Shooter session and prints a summary.
#[derive(Debug, Parser)]
#[command(name = "dimension-shooter", version)]
struct Args {
    /// TOML file with session settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of levels to clear; 0 plays until the player falls.
    #[arg(long)]
    levels: Option<u32>,
    /// Root seed for level generation and spawning.
    #[arg(long)]
    seed: Option<u64>,
    /// Minimum distance between the player and new enemies.
    #[arg(long)]
    spawn_distance: Option<f32>,
    /// Upper bound on simulated ticks.
    #[arg(long)]
    max_ticks: Option<u64>,
    /// Tracing filter used when RUST_LOG is unset.
    #[arg(long)]
    log: Option<String>,
}

impl Args {
    fn apply(self, config: &mut SessionConfig) {
        if let Some(levels) = self.levels {
            config.levels = levels;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(distance) = self.spawn_distance {
            config.spawn_distance = distance;
        }
        if let Some(max_ticks) = self.max_ticks {
            config.max_ticks = max_ticks;
        }
        if let Some(filter) = self.log {
            config.log_filter = filter;
        }
    }
}

/// Entry point for the Dimension Shooter command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = SessionConfig::load(args.config.as_deref())
        .context("failed to load session configuration")?;
    args.apply(&mut config);
    config.validate().context("invalid session configuration")?;

    init_tracing(&config.log_filter);

    let summary = Simulation::new(&config).run();
    println!("{summary}");
    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();
    let _ = subscriber.try_init();
}
