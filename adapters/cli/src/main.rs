#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Grid Snake experience.

mod config;
mod simulation;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use grid_snake_rendering::{GridPresentation, Palette, Presentation, RenderingBackend, Scene};
use grid_snake_rendering_macroquad::MacroquadBackend;
use grid_snake_world::{query, Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

use self::{
    config::{ConfigOverrides, GameConfig},
    simulation::Simulation,
};

/// Grid Snake: steer the snake, eat the food, avoid walls and obstacles.
#[derive(Debug, Parser)]
#[command(name = "grid-snake", version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of grid columns.
    #[arg(long)]
    width: Option<u32>,

    /// Number of grid rows.
    #[arg(long)]
    height: Option<u32>,

    /// Side length of a cell in pixels.
    #[arg(long)]
    cell_size: Option<f32>,

    /// Seed for food and obstacle placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Synchronise presentation with the display refresh rate.
    #[arg(long, overrides_with = "no_vsync")]
    vsync: bool,

    /// Render as fast as possible.
    #[arg(long = "no-vsync", overrides_with = "vsync")]
    no_vsync: bool,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        let vsync = match (self.vsync, self.no_vsync) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        };

        ConfigOverrides {
            grid_width: self.width,
            grid_height: self.height,
            cell_size: self.cell_size,
            seed: self.seed,
            vsync,
        }
    }
}

/// Entry point for the Grid Snake command-line interface.
fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => GameConfig::load_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => GameConfig::default(),
    };
    let config = file_config
        .with_overrides(args.overrides())
        .validate()
        .context("invalid game configuration")?;

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(
        width = config.grid_width,
        height = config.grid_height,
        seed,
        "starting session"
    );

    let mut simulation = Simulation::new(Config::new(config.grid(), seed));
    info!("{}", query::welcome_banner(simulation.state()));

    let grid = GridPresentation::new(config.grid(), config.cell_size)
        .context("failed to describe the grid")?;
    let palette = Palette::default();
    let scene = Scene::new(grid, palette, simulation.snapshot());
    let presentation = Presentation::new("Grid Snake", palette.background, config.vsync, scene);

    MacroquadBackend::new()
        .with_vsync(config.vsync)
        .run(presentation, move |dt, input, scene| {
            let head_center = scene.head_center();
            let _ = simulation.advance(dt, &input, head_center);
            scene.refresh(simulation.snapshot(), simulation.status());
        })
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
