//! Simulation state snapshot.

use crate::grid::Grid;
use crate::organism::Organism;
use life_core::{CellType, Error, OrganismId, PopulationStats, Result};
use life_genome::validate_body;
use serde::{Deserialize, Serialize};

/// Everything a renderer needs to draw one frame.
///
/// The tick engine consumes a state by value and returns the next one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub grid: Grid,
    /// Processing order for the next tick
    pub organisms: Vec<Organism>,
    pub width: i32,
    pub height: i32,
    /// Incremented once per tick with at least one birth
    pub generation: u64,
    pub tick: u64,
    /// Play/pause flag for the driving loop; the tick engine ignores it
    pub running: bool,
}

impl SimulationState {
    /// Empty world of the given size, generation 1, tick 0
    pub fn empty(width: i32, height: i32) -> Self {
        Self {
            grid: Grid::new(width, height),
            organisms: Vec::new(),
            width,
            height,
            generation: 1,
            tick: 0,
            running: false,
        }
    }

    pub fn organism(&self, id: OrganismId) -> Option<&Organism> {
        self.organisms.iter().find(|o| o.id == id)
    }

    pub fn population(&self) -> usize {
        self.organisms.len()
    }

    /// Statistics shown next to the simulation view
    pub fn stats(&self) -> PopulationStats {
        PopulationStats::from_organisms(
            self.tick,
            self.generation,
            self.organisms
                .iter()
                .map(|o| (o.color, o.cells.iter().map(|c| c.cell_type))),
            self.grid.count(CellType::Food),
        )
    }

    /// Check the structural invariants the tick engine relies on
    pub fn validate(&self) -> Result<()> {
        if self.grid.width != self.width || self.grid.height != self.height {
            return Err(Error::InvariantViolation(format!(
                "Grid is {}x{} but state says {}x{}",
                self.grid.width, self.grid.height, self.width, self.height
            )));
        }

        let expected = Grid::area(self.width, self.height);
        if self.grid.len() != expected {
            return Err(Error::InvariantViolation(format!(
                "Grid holds {} tiles, expected {}",
                self.grid.len(),
                expected
            )));
        }

        for organism in &self.organisms {
            validate_body(&organism.cells).map_err(|e| {
                Error::InvariantViolation(format!("Organism {}: {}", organism.id, e))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_core::{Position, SpeciesColor};
    use life_genome::body::default_body;
    use life_genome::OrganismCell;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_empty_state() {
        let state = SimulationState::empty(12, 8);
        assert_eq!(state.generation, 1);
        assert_eq!(state.tick, 0);
        assert!(!state.running);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_validate_dimension_mismatch() {
        let mut state = SimulationState::empty(12, 8);
        state.width = 13;
        assert!(matches!(
            state.validate(),
            Err(Error::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_validate_bad_body() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut state = SimulationState::empty(12, 8);
        let mut organism =
            Organism::spawn(OrganismId(1), Position::new(2, 2), default_body(), &mut rng);
        organism.cells.push(OrganismCell::at(CellType::Killer, 0, 0));
        state.organisms.push(organism);

        assert!(state.validate().is_err());

        state.organisms[0].cells.clear();
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_stats() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut state = SimulationState::empty(12, 8);
        for (i, x) in [1, 4, 7].into_iter().enumerate() {
            let mut organism = Organism::spawn(
                OrganismId(i as u64 + 1),
                Position::new(x, 2),
                default_body(),
                &mut rng,
            );
            organism.color = SpeciesColor::new(if i == 0 { 30 } else { 90 });
            state.organisms.push(organism);
        }
        state.grid.set(Position::new(0, 0), CellType::Food);

        let stats = state.stats();
        assert_eq!(stats.population, 3);
        assert_eq!(stats.species_count, 2);
        assert_eq!(stats.total_cells, 6);
        assert_eq!(stats.cell_types.mover, 3);
        assert_eq!(stats.food_count, 1);
        assert!(state.organism(OrganismId(2)).is_some());
        assert!(state.organism(OrganismId(9)).is_none());
    }
}
