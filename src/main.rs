//! # Scavenger Main Entry Point
//!
//! Parses the command line, loads settings, sets up logging and runs the
//! macroquad scene loop.

use clap::Parser;
use macroquad::prelude::*;
use scavenger::{
    config, utils, GameSettings, Generator, InputHandler, LevelGenerator, ScavengerError,
    ScavengerResult, SceneManager,
};
use std::path::PathBuf;

/// Command line arguments for Scavenger.
#[derive(Parser, Debug)]
#[command(name = "scavenger")]
#[command(about = "A turn-based survival roguelike on a procedurally generated grid")]
#[command(version)]
struct Args {
    /// Random seed for level generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Day to start on
    #[arg(short, long, default_value_t = 1)]
    level: u32,

    /// Print the placement plan for this day as JSON and exit
    #[arg(long, value_name = "DAY")]
    print_plan: Option<u32>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Scavenger".to_owned(),
        window_width: 1024,
        window_height: 768,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() -> ScavengerResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    log::info!("Starting Scavenger v{}", scavenger::VERSION);

    let settings = load_settings(&args)?;

    if let Some(day) = args.print_plan {
        return print_plan(&settings, day);
    }

    let mut scenes = SceneManager::starting_at(settings, args.level, InputHandler::new())?;
    scenes.run().await
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    let level = log_level
        .parse::<log::LevelFilter>()
        .unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .init();
}

fn load_settings(args: &Args) -> ScavengerResult<GameSettings> {
    let mut settings = match &args.config {
        Some(path) => GameSettings::load_from_file(path)?,
        None => GameSettings::default(),
    };
    if let Some(seed) = args.seed {
        settings.generation.seed = seed;
    }
    settings.validate()?;
    log::debug!(
        "Board {}x{} (defaults {}x{}), seed {}",
        settings.generation.width,
        settings.generation.height,
        config::DEFAULT_COLUMNS,
        config::DEFAULT_ROWS,
        settings.generation.seed
    );
    Ok(settings)
}

fn print_plan(settings: &GameSettings, day: u32) -> ScavengerResult<()> {
    if day == 0 {
        return Err(ScavengerError::InvalidConfig("days are numbered from 1".to_string()));
    }
    let generator = LevelGenerator::new();
    let mut rng = utils::create_level_rng(&settings.generation, day);
    let plan = generator.generate(day, &settings.generation, &mut rng)?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
