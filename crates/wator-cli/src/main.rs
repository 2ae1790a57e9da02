//! Headless runner for the Wa-Tor simulation.

mod render;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use render::AsciiRenderer;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use wator_core::SimulationConfig;
use wator_world::{Driver, Population, Renderer, Simulation};

#[derive(Debug, Parser)]
#[command(name = "wator", about = "Run the Wa-Tor predator-prey simulation")]
struct Args {
    /// JSON configuration file; missing fields take defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Number of generations to simulate
    #[arg(long)]
    generations: Option<u64>,

    #[arg(long)]
    width: Option<i32>,

    #[arg(long)]
    height: Option<i32>,

    /// Initial fish percentage
    #[arg(long)]
    fish_percent: Option<i32>,

    /// Initial shark percentage
    #[arg(long)]
    shark_percent: Option<i32>,

    /// Print an ASCII frame every N generations (0 disables)
    #[arg(long, default_value_t = 0)]
    render_every: u64,

    /// Write a JSON population history to this path when done
    #[arg(long)]
    summary_out: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    config: SimulationConfig,
    generations: u64,
    ticks: u64,
    history: Vec<Population>,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(generations) = args.generations {
        config.num_generations = generations;
    }
    if let Some(width) = args.width {
        config.world.width = width;
    }
    if let Some(height) = args.height {
        config.world.height = height;
    }
    if let Some(fish) = args.fish_percent {
        config.population.fish_percent = fish;
    }
    if let Some(sharks) = args.shark_percent {
        config.population.shark_percent = sharks;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init_telemetry(args.json_logs)?;

    let config = load_config(&args)?;
    info!(
        seed = config.seed,
        generations = config.num_generations,
        width = config.world.width,
        height = config.world.height,
        "Starting Wa-Tor"
    );

    let mut simulation = Simulation::new(config.clone())?;
    let mut driver = Driver::new(config.driver.ticks_per_generation);
    let mut renderer = AsciiRenderer::new(std::io::stdout().lock());
    // Only kept when it will be written out.
    let mut history = args.summary_out.as_ref().map(|_| Vec::new());

    if args.render_every > 0 {
        renderer.render(&simulation.world().snapshot())?;
    }

    while simulation.generation() < config.num_generations {
        if driver.tick(&mut simulation).is_none() {
            continue;
        }
        if let Some(history) = history.as_mut() {
            history.push(simulation.world().population());
        }
        if args.render_every > 0 && simulation.generation() % args.render_every == 0 {
            renderer.render(&simulation.world().snapshot())?;
        }
    }

    let final_population = simulation.world().population();
    info!(
        generations = simulation.generation(),
        ticks = driver.ticks(),
        fish = final_population.fish,
        sharks = final_population.sharks,
        frames = renderer.frames(),
        "Run finished"
    );

    if let (Some(path), Some(history)) = (&args.summary_out, history) {
        let summary = RunSummary {
            config,
            generations: simulation.generation(),
            ticks: driver.ticks(),
            history,
        };
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!("Summary written to {}", path.display());
    }

    Ok(())
}
