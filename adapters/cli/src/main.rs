#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Last Stand experience.

mod audio;
mod headless;
mod logging;
mod scene;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use last_stand_core::GameConfig;
use last_stand_rendering::{Color, Presentation, ProjectionConfig, RenderingBackend};
use last_stand_rendering_macroquad::MacroquadBackend;
use last_stand_simulation::Simulation;
use last_stand_world::query;
use log::info;

use crate::audio::LogAudio;

/// First-person wave survival in a raycast arena.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file overriding any subset of the game tuning.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Seed for every random stream in the simulation.
    #[arg(long)]
    seed: Option<u64>,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long)]
    vsync: bool,
    /// Print frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,
    /// Raise game log verbosity; repeat to include per-tick audio cues.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Run this many simulation ticks without a window and log a summary.
    #[arg(long, value_name = "TICKS")]
    headless_ticks: Option<u32>,
    /// Write the final headless view to this file as a PPM image.
    #[arg(long, value_name = "FILE", requires = "headless_ticks")]
    frame_dump: Option<PathBuf>,
}

/// Entry point for the Last Stand command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = settings::load(args.config.as_deref(), args.seed)?;
    match args.headless_ticks {
        Some(ticks) => headless::run(config, ticks, args.frame_dump.as_deref()),
        None => run_windowed(config, args.vsync, args.show_fps),
    }
}

fn run_windowed(config: GameConfig, vsync: bool, show_fps: bool) -> Result<()> {
    let mut simulation = Simulation::new(config, LogAudio).context("invalid game configuration")?;
    info!("{}", query::welcome_banner(simulation.world()));

    let presentation = Presentation::new(
        "Last Stand",
        Color::from_rgb_u8(0, 0, 0),
        scene::capture(&simulation),
        ProjectionConfig::default(),
    );

    MacroquadBackend::new()
        .with_vsync(vsync)
        .with_show_fps(show_fps)
        .run(presentation, move |frame_dt, input, scene| {
            simulation.submit_input(input.player);
            let _ = simulation.advance(frame_dt);
            scene::refresh(&simulation, scene);
        })
}
