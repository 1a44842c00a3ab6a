#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drops balls through a Galton board and saves the histogram.

mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use galton_board_core::BoardSettings;
use galton_board_rendering::HistogramCanvas;
use galton_board_system_simulation::Simulation;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Simulates a Galton board and renders the landing distribution as an image.
#[derive(Debug, Parser)]
#[command(name = "galton-board", version)]
struct Args {
    /// TOML file describing the board; flags below override its values.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of peg rows.
    #[arg(long)]
    rows: Option<u32>,
    /// Number of balls to drop.
    #[arg(long)]
    balls: Option<u64>,
    /// Board width in pixels.
    #[arg(long)]
    width: Option<u32>,
    /// Board height in pixels.
    #[arg(long)]
    height: Option<u32>,
    /// Seed for a reproducible run; omitted runs draw from system entropy.
    #[arg(long)]
    seed: Option<u64>,
    /// Destination of the rendered histogram.
    #[arg(long, short, value_name = "PATH", default_value = "galton_board.png")]
    output: PathBuf,
}

impl Args {
    fn apply_overrides(&self, settings: &mut BoardSettings) {
        if let Some(rows) = self.rows {
            settings.num_rows = rows;
        }
        if let Some(balls) = self.balls {
            settings.num_balls = balls;
        }
        if let Some(width) = self.width {
            settings.board_width = width;
        }
        if let Some(height) = self.height {
            settings.board_height = height;
        }
    }
}

/// Entry point for the Galton board command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut settings = settings::load_settings(args.config.as_deref())?;
    args.apply_overrides(&mut settings);
    let config = settings
        .validate()
        .context("invalid board configuration")?;

    let mut simulation = match args.seed {
        Some(seed) => Simulation::seeded(config.clone(), seed),
        None => Simulation::from_entropy(config.clone()),
    };
    simulation.simulate();
    let slot_counts = simulation.into_slot_counts();
    if let Some(mean) = slot_counts.mean_index() {
        info!("mean landing column {mean:.1}");
    }

    let mut canvas = HistogramCanvas::new(config);
    canvas.draw_histogram(&slot_counts);
    canvas.save_image(&args.output)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
