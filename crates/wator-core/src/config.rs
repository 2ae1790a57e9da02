//! Configuration types for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// World configuration parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the world grid
    pub width: i32,
    /// Height of the world grid
    pub height: i32,
    /// Pixel size of one cell; only renderers look at this
    pub scale: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
            scale: 2,
        }
    }
}

/// Breeding and starvation constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesConfig {
    /// Generations a fish must survive before it can breed
    pub fish_breed_time: i32,
    /// Generations a shark must survive before it can breed
    pub shark_breed_time: i32,
    /// Generations a shark can go without eating
    pub shark_starve: i32,
}

impl Default for SpeciesConfig {
    fn default() -> Self {
        Self {
            fish_breed_time: 3,
            shark_breed_time: 8,
            shark_starve: 3,
        }
    }
}

/// Initial population mix, in percent of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub fish_percent: i32,
    pub shark_percent: i32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            fish_percent: 90,
            shark_percent: 10,
        }
    }
}

impl PopulationConfig {
    /// Percentage of cells left empty at start
    pub fn empty_percent(&self) -> i32 {
        100 - self.fish_percent - self.shark_percent
    }
}

/// Cadence of the outer loop driving the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Driver ticks per generation update
    pub ticks_per_generation: u32,
    /// Emit population metrics every this many generations (0 disables)
    pub metrics_interval: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            ticks_per_generation: 2,
            metrics_interval: 100,
        }
    }
}

/// Full simulation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Number of generations `run` advances
    pub num_generations: u64,
    pub world: WorldConfig,
    pub species: SpeciesConfig,
    pub population: PopulationConfig,
    pub driver: DriverConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            num_generations: 1_000,
            world: WorldConfig::default(),
            species: SpeciesConfig::default(),
            population: PopulationConfig::default(),
            driver: DriverConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject inconsistent values. Nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        let world = &self.world;
        if world.width <= 0 || world.height <= 0 {
            return Err(Error::Config(format!(
                "grid dimensions must be positive, got {}x{}",
                world.width, world.height
            )));
        }
        // Cell indices are computed in i32, so the area must fit there too.
        let area = (world.width as usize).checked_mul(world.height as usize);
        if !area.is_some_and(|cells| cells <= i32::MAX as usize) {
            return Err(Error::Config(format!(
                "grid {}x{} has too many cells",
                world.width, world.height
            )));
        }
        if world.scale <= 0 {
            return Err(Error::Config(format!(
                "scale must be positive, got {}",
                world.scale
            )));
        }

        let species = &self.species;
        for (name, value) in [
            ("fish_breed_time", species.fish_breed_time),
            ("shark_breed_time", species.shark_breed_time),
            ("shark_starve", species.shark_starve),
        ] {
            if value <= 0 {
                return Err(Error::Config(format!("{name} must be positive, got {value}")));
            }
        }

        let population = &self.population;
        for (name, value) in [
            ("fish_percent", population.fish_percent),
            ("shark_percent", population.shark_percent),
        ] {
            if !(0..=100).contains(&value) {
                return Err(Error::Config(format!(
                    "{name} must be within 0..=100, got {value}"
                )));
            }
        }
        if population.fish_percent + population.shark_percent > 100 {
            return Err(Error::Config(format!(
                "fish_percent + shark_percent must not exceed 100, got {} + {}",
                population.fish_percent, population.shark_percent
            )));
        }

        if self.driver.ticks_per_generation == 0 {
            return Err(Error::Config(
                "ticks_per_generation must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let config = SimulationConfig::default();
        assert_eq!(config.world.width, 300);
        assert_eq!(config.world.height, 300);
        assert_eq!(config.species.fish_breed_time, 3);
        assert_eq!(config.species.shark_breed_time, 8);
        assert_eq!(config.species.shark_starve, 3);
        assert_eq!(config.population.empty_percent(), 0);
        assert_eq!(config.driver.ticks_per_generation, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_overfull_population() {
        let config = SimulationConfig {
            population: PopulationConfig {
                fish_percent: 80,
                shark_percent: 30,
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_negative_percent() {
        let config = SimulationConfig {
            population: PopulationConfig {
                fish_percent: -5,
                shark_percent: 10,
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_degenerate_world() {
        let mut config = SimulationConfig::default();
        config.world.width = 0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.species.shark_starve = 0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.driver.ticks_per_generation = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_world() {
        let mut config = SimulationConfig::default();
        config.world.width = 50_000;
        config.world.height = 50_000;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.world.height = 40_000;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "seed": 9, "world": { "width": 16, "height": 8 } }"#;
        let config: SimulationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.world.width, 16);
        assert_eq!(config.world.scale, 2);
        assert_eq!(config.species, SpeciesConfig::default());
    }

    #[test]
    fn test_config_serialization() {
        let config = SimulationConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
