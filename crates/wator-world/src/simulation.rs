//! Simulation driver: owns the world, the random source and the clock.

use crate::engine::{self, ClaimObserver, GenerationReport};
use crate::world::{Population, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, event, info, instrument, warn, Level};
use wator_core::{Error, Result, SimulationConfig};

pub struct Simulation {
    world: World,
    config: SimulationConfig,
    rng: ChaCha8Rng,
    generation: u64,
    totals: GenerationReport,
    fish_extinct: bool,
    sharks_extinct: bool,
}

impl Simulation {
    /// Validate `config`, seed the random source and populate a fresh world.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let world = World::populate(
            config.world.width,
            config.world.height,
            &config.population,
            &config.species,
            &mut rng,
        );

        info!(
            event = "world_initialized",
            seed = config.seed,
            width = config.world.width,
            height = config.world.height,
            fish_percent = config.population.fish_percent,
            shark_percent = config.population.shark_percent,
            empty_percent = config.population.empty_percent(),
            fish = world.population().fish,
            sharks = world.population().sharks,
            "Populated ocean"
        );

        Ok(Self::with_parts(world, config, rng))
    }

    /// Wrap a hand-built world. The random source is still seeded from `config`.
    pub fn from_world(config: SimulationConfig, world: World) -> Result<Self> {
        config.validate()?;
        if world.width() != config.world.width || world.height() != config.world.height {
            return Err(Error::Config(format!(
                "world is {}x{} but config says {}x{}",
                world.width(),
                world.height(),
                config.world.width,
                config.world.height
            )));
        }
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self::with_parts(world, config, rng))
    }

    fn with_parts(world: World, config: SimulationConfig, rng: ChaCha8Rng) -> Self {
        let population = world.population();
        Self {
            world,
            config,
            rng,
            generation: 0,
            totals: GenerationReport::default(),
            fish_extinct: population.fish == 0,
            sharks_extinct: population.sharks == 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of completed generations
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Sum of every report since the simulation started
    pub fn totals(&self) -> GenerationReport {
        self.totals
    }

    /// Advance one generation
    pub fn step(&mut self) -> GenerationReport {
        self.step_with_observer(&mut ())
    }

    /// Advance one generation, reporting every write into the next grid
    pub fn step_with_observer<O: ClaimObserver>(&mut self, observer: &mut O) -> GenerationReport {
        let report = engine::advance_with_observer(
            &mut self.world,
            &self.config.species,
            &mut self.rng,
            observer,
        );
        self.generation += 1;
        self.totals += report;

        debug!(
            generation = self.generation,
            fish_born = report.fish_born,
            sharks_born = report.sharks_born,
            fish_eaten = report.fish_eaten,
            sharks_starved = report.sharks_starved,
            "Generation complete"
        );

        self.check_extinction();

        let interval = self.config.driver.metrics_interval;
        if interval > 0 && self.generation % interval == 0 {
            self.emit_population_metrics(&report);
        }

        report
    }

    /// Run the configured number of generations
    #[instrument(skip(self), fields(num_generations = self.config.num_generations))]
    pub fn run(&mut self) -> SimulationResult {
        info!(
            "Starting simulation for {} generations",
            self.config.num_generations
        );

        let mut history = Vec::new();
        for _ in 0..self.config.num_generations {
            self.step();
            history.push(self.world.population());
        }

        let result = SimulationResult {
            generations: self.generation,
            final_population: self.world.population(),
            totals: self.totals,
            history,
        };

        info!(
            event = "simulation_summary",
            generations = result.generations,
            fish = result.final_population.fish,
            sharks = result.final_population.sharks,
            fish_born_total = self.totals.fish_born,
            sharks_born_total = self.totals.sharks_born,
            fish_eaten_total = self.totals.fish_eaten,
            sharks_starved_total = self.totals.sharks_starved,
            "Simulation complete"
        );

        result
    }

    fn check_extinction(&mut self) {
        let population = self.world.population();
        if population.fish == 0 && !self.fish_extinct {
            self.fish_extinct = true;
            warn!(event = "extinction", species = "fish", generation = self.generation, "Fish died out");
        }
        if population.sharks == 0 && !self.sharks_extinct {
            self.sharks_extinct = true;
            warn!(event = "extinction", species = "shark", generation = self.generation, "Sharks died out");
        }
    }

    fn emit_population_metrics(&self, report: &GenerationReport) {
        let population = self.world.population();
        info!(
            event = "population_metrics",
            generation = self.generation,
            fish = population.fish,
            sharks = population.sharks,
            empty = population.empty,
            fish_born = report.fish_born,
            sharks_born = report.sharks_born,
            fish_eaten = report.fish_eaten,
            sharks_starved = report.sharks_starved,
            "Population metrics snapshot"
        );

        event!(
            Level::INFO,
            gauge_name = "population_fish",
            gauge_value = population.fish,
            generation = self.generation,
            "Fish population gauge"
        );

        event!(
            Level::INFO,
            gauge_name = "population_sharks",
            gauge_value = population.sharks,
            generation = self.generation,
            "Shark population gauge"
        );
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub generations: u64,
    pub final_population: Population,
    pub totals: GenerationReport,
    /// Census after each completed generation
    pub history: Vec<Population>,
}

/// Counts outer-loop ticks and advances the simulation on a fixed cadence.
#[derive(Debug, Clone)]
pub struct Driver {
    ticks_per_generation: u32,
    ticks: u64,
}

impl Driver {
    pub fn new(ticks_per_generation: u32) -> Self {
        Self {
            ticks_per_generation: ticks_per_generation.max(1),
            ticks: 0,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Register one tick. Returns the report if this tick advanced a generation.
    pub fn tick(&mut self, simulation: &mut Simulation) -> Option<GenerationReport> {
        self.ticks += 1;
        if self.ticks % u64::from(self.ticks_per_generation) == 0 {
            Some(simulation.step())
        } else {
            None
        }
    }
}
