//! Population statistics.

use crate::{CellType, SpeciesColor};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of body cells of each type across the whole population
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellTypeCounts {
    pub mouth: usize,
    pub producer: usize,
    pub mover: usize,
    pub killer: usize,
}

impl CellTypeCounts {
    pub fn record(&mut self, cell_type: CellType) {
        match cell_type {
            CellType::Mouth => self.mouth += 1,
            CellType::Producer => self.producer += 1,
            CellType::Mover => self.mover += 1,
            CellType::Killer => self.killer += 1,
            _ => {}
        }
    }

    pub fn total(&self) -> usize {
        self.mouth + self.producer + self.mover + self.killer
    }
}

/// Snapshot of the population at one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub tick: u64,
    pub generation: u64,
    pub population: usize,
    /// Distinct species colors alive
    pub species_count: usize,
    pub total_cells: usize,
    pub cell_types: CellTypeCounts,
    /// Food tiles on the grid
    pub food_count: usize,
}

impl PopulationStats {
    pub fn new(tick: u64, generation: u64) -> Self {
        Self {
            tick,
            generation,
            ..Default::default()
        }
    }

    /// Build a snapshot from `(color, body cell types)` per organism
    pub fn from_organisms<I, C>(tick: u64, generation: u64, organisms: I, food_count: usize) -> Self
    where
        I: IntoIterator<Item = (SpeciesColor, C)>,
        C: IntoIterator<Item = CellType>,
    {
        let mut stats = Self::new(tick, generation);
        let mut species = HashSet::new();

        for (color, cells) in organisms {
            stats.population += 1;
            species.insert(color);
            for cell_type in cells {
                stats.total_cells += 1;
                stats.cell_types.record(cell_type);
            }
        }

        stats.species_count = species.len();
        stats.food_count = food_count;
        stats
    }

    /// Mean body size, 0.0 for an empty population
    pub fn average_size(&self) -> f64 {
        if self.population == 0 {
            0.0
        } else {
            self.total_cells as f64 / self.population as f64
        }
    }

    pub fn is_extinct(&self) -> bool {
        self.population == 0
    }
}
