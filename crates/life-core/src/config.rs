//! Configuration types for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hard cap on the number of cells in one organism body
pub const MAX_ORGANISM_CELLS: usize = 20;

/// Upper bound of the food spawn rate the settings panel exposes
pub const FOOD_SPAWN_RATE_MAX: f64 = 0.005;

/// Range of the population cap the settings panel exposes
pub const MAX_ORGANISMS_MIN: usize = 100;
pub const MAX_ORGANISMS_MAX: usize = 1000;

/// Per-tick simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Width of the world grid
    pub width: i32,
    /// Height of the world grid
    pub height: i32,
    /// Size of one tile in pixels (rendering only)
    pub cell_size: u32,
    /// Food spawn probability density per tile per tick
    pub food_spawn_rate: f64,
    /// Ticks of life per body cell
    pub lifespan_multiplier: u32,
    /// Probability that a reproduction event mutates the body (0.0 to 1.0)
    pub mutation_rate: f64,
    /// Organisms requested at init
    pub initial_organisms: usize,
    /// Population cap
    pub max_organisms: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 60,
            cell_size: 8,
            food_spawn_rate: 0.001,
            lifespan_multiplier: 10,
            mutation_rate: 0.3,
            initial_organisms: 20,
            max_organisms: 500,
        }
    }
}

impl SimulationConfig {
    /// Check that the configuration describes a runnable world
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::Validation(format!(
                "Grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        if !(0.0..=1.0).contains(&self.food_spawn_rate) {
            return Err(Error::Validation(format!(
                "food_spawn_rate must be within [0, 1], got {}",
                self.food_spawn_rate
            )));
        }

        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::Validation(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }

        if self.lifespan_multiplier == 0 {
            return Err(Error::Validation(
                "lifespan_multiplier must be at least 1".to_string(),
            ));
        }

        if self.max_organisms == 0 {
            return Err(Error::Validation(
                "max_organisms must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Apply a settings change between ticks.
    ///
    /// Fields driven by the settings panel are clamped to the panel's ranges.
    /// Grid dimensions only take effect on the next reset.
    pub fn apply(&mut self, update: &ConfigUpdate) {
        if let Some(width) = update.width {
            self.width = width;
        }
        if let Some(height) = update.height {
            self.height = height;
        }
        if let Some(cell_size) = update.cell_size {
            self.cell_size = cell_size;
        }
        if let Some(rate) = update.food_spawn_rate {
            self.food_spawn_rate = rate.clamp(0.0, FOOD_SPAWN_RATE_MAX);
        }
        if let Some(multiplier) = update.lifespan_multiplier {
            self.lifespan_multiplier = multiplier.max(1);
        }
        if let Some(rate) = update.mutation_rate {
            self.mutation_rate = rate.clamp(0.0, 1.0);
        }
        if let Some(count) = update.initial_organisms {
            self.initial_organisms = count;
        }
        if let Some(cap) = update.max_organisms {
            self.max_organisms = cap.clamp(MAX_ORGANISMS_MIN, MAX_ORGANISMS_MAX);
        }
    }
}

/// Partial settings change, as sent by a settings panel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigUpdate {
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub cell_size: Option<u32>,
    pub food_spawn_rate: Option<f64>,
    pub lifespan_multiplier: Option<u32>,
    pub mutation_rate: Option<f64>,
    pub initial_organisms: Option<usize>,
    pub max_organisms: Option<usize>,
}

/// Headless runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Upper bound on ticks per second
    pub tick_rate_hz: u32,
    /// Stop after this many ticks (runs until interrupted if unset)
    pub max_ticks: Option<u64>,
    /// Emit population statistics every N ticks
    pub stats_interval: u64,
    /// Random seed for reproducible runs (entropy if unset)
    pub seed: Option<u64>,
    /// Emit JSON log lines instead of human-readable ones
    pub json_logs: bool,
    /// Stop once the population reaches zero
    pub stop_on_extinction: bool,
    /// Simulation parameters
    pub simulation: SimulationConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 30,
            max_ticks: None,
            stats_interval: 100,
            seed: None,
            json_logs: false,
            stop_on_extinction: true,
            simulation: SimulationConfig::default(),
        }
    }
}

impl RunnerConfig {
    /// Load a runner configuration from a JSON file. Missing fields take defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: RunnerConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_rate_hz == 0 {
            return Err(Error::Validation("tick_rate_hz must be at least 1".to_string()));
        }
        self.simulation.validate()
    }
}
