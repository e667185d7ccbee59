//! Mutation operators for organism bodies.

use crate::body::{self, OrganismCell};
use life_core::{CellType, Direction, MAX_ORGANISM_CELLS};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// The structural change a mutation event applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationKind {
    /// Grow a new cell next to an existing one
    AddCell,
    /// Drop one cell
    RemoveCell,
    /// Reassign one cell's type
    ChangeType,
}

impl MutationKind {
    pub fn all() -> [MutationKind; 3] {
        [
            MutationKind::AddCell,
            MutationKind::RemoveCell,
            MutationKind::ChangeType,
        ]
    }

    pub fn random(rng: &mut ChaCha8Rng) -> Self {
        Self::all()[rng.gen_range(0..3)]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Probability that a reproduction event mutates the body
    pub mutation_rate: f64,
    /// Maximum number of cells in a body
    pub max_cells: usize,
    /// Bodies at or below this size never lose a cell
    pub min_cells: usize,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.3,
            max_cells: MAX_ORGANISM_CELLS,
            min_cells: 2,
        }
    }
}

pub struct Mutator {
    config: MutationConfig,
}

impl Mutator {
    pub fn new(config: MutationConfig) -> Self {
        Self { config }
    }

    pub fn with_rate(mutation_rate: f64) -> Self {
        Self::new(MutationConfig {
            mutation_rate,
            ..Default::default()
        })
    }

    /// Produce the offspring body for `cells`.
    ///
    /// The parent's cells are never touched; the result is always a fresh
    /// vector, equal to the parent's when no mutation fires.
    pub fn mutate(&self, cells: &[OrganismCell], rng: &mut ChaCha8Rng) -> Vec<OrganismCell> {
        let mut offspring = cells.to_vec();

        if rng.gen::<f64>() >= self.config.mutation_rate {
            return offspring;
        }

        let kind = MutationKind::random(rng);
        let changed = self.apply(kind, &mut offspring, rng);
        trace!(?kind, changed, cells = offspring.len(), "Body mutated");

        offspring
    }

    /// Apply one mutation of the given kind in place.
    ///
    /// Returns false when the mutation had no effect (target occupied, size
    /// limits, or a type change that reselected the same type).
    pub fn apply(
        &self,
        kind: MutationKind,
        cells: &mut Vec<OrganismCell>,
        rng: &mut ChaCha8Rng,
    ) -> bool {
        if cells.is_empty() {
            return false;
        }

        match kind {
            MutationKind::AddCell => self.add_cell(cells, rng),
            MutationKind::RemoveCell => self.remove_cell(cells, rng),
            MutationKind::ChangeType => self.change_type(cells, rng),
        }
    }

    fn add_cell(&self, cells: &mut Vec<OrganismCell>, rng: &mut ChaCha8Rng) -> bool {
        if cells.len() >= self.config.max_cells {
            return false;
        }

        let anchor = cells[rng.gen_range(0..cells.len())].relative_pos;
        let target = anchor.step(Direction::random(rng), 1);

        if body::occupies(cells, target) {
            return false;
        }

        cells.push(OrganismCell::new(CellType::random_body_part(rng), target));
        true
    }

    fn remove_cell(&self, cells: &mut Vec<OrganismCell>, rng: &mut ChaCha8Rng) -> bool {
        if cells.len() <= self.config.min_cells {
            return false;
        }

        let idx = rng.gen_range(0..cells.len());
        cells.remove(idx);
        true
    }

    fn change_type(&self, cells: &mut [OrganismCell], rng: &mut ChaCha8Rng) -> bool {
        let idx = rng.gen_range(0..cells.len());
        let new_type = CellType::random_body_part(rng);
        let changed = cells[idx].cell_type != new_type;
        cells[idx].cell_type = new_type;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::default_body;
    use crate::validation::validate_body;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn line_body(len: i32) -> Vec<OrganismCell> {
        (0..len)
            .map(|x| OrganismCell::at(CellType::Mouth, x, 0))
            .collect()
    }

    #[test]
    fn test_zero_rate_copies_body() {
        let mutator = Mutator::with_rate(0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let parent = default_body();

        for _ in 0..100 {
            let child = mutator.mutate(&parent, &mut rng);
            assert_eq!(child, parent);
            assert_ne!(child.as_ptr(), parent.as_ptr());
        }
    }

    #[test]
    fn test_full_rate_leaves_parent_untouched() {
        let mutator = Mutator::with_rate(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let parent = line_body(5);
        let snapshot = parent.clone();

        let mut saw_change = false;
        for _ in 0..50 {
            let child = mutator.mutate(&parent, &mut rng);
            saw_change |= child != parent;
        }

        assert_eq!(parent, snapshot);
        assert!(saw_change);
    }

    #[test]
    fn test_add_cell_appends_adjacent() {
        let mutator = Mutator::with_rate(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let mut cells = vec![OrganismCell::at(CellType::Mouth, 0, 0)];
        assert!(mutator.apply(MutationKind::AddCell, &mut cells, &mut rng));
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[1].relative_pos.manhattan_length(), 1);
        assert!(cells[1].cell_type.is_body_part());
    }

    #[test]
    fn test_add_cell_respects_cap() {
        let mutator = Mutator::with_rate(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let mut cells = line_body(MAX_ORGANISM_CELLS as i32);
        for _ in 0..20 {
            assert!(!mutator.apply(MutationKind::AddCell, &mut cells, &mut rng));
        }
        assert_eq!(cells.len(), MAX_ORGANISM_CELLS);
    }

    #[test]
    fn test_repeated_adds_never_duplicate_positions() {
        let mutator = Mutator::with_rate(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let mut cells = vec![OrganismCell::at(CellType::Mouth, 0, 0)];
        let mut attempts = 0;
        while cells.len() < 5 && attempts < 1000 {
            mutator.apply(MutationKind::AddCell, &mut cells, &mut rng);
            attempts += 1;
        }
        assert!(validate_body(&cells).is_ok());
    }

    #[test]
    fn test_remove_cell_keeps_minimum() {
        let mutator = Mutator::with_rate(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let mut cells = default_body();
        assert!(!mutator.apply(MutationKind::RemoveCell, &mut cells, &mut rng));
        assert_eq!(cells.len(), 2);

        let mut cells = line_body(4);
        assert!(mutator.apply(MutationKind::RemoveCell, &mut cells, &mut rng));
        assert_eq!(cells.len(), 3);
    }

    #[test]
    fn test_change_type_keeps_positions() {
        let mutator = Mutator::with_rate(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let mut cells = line_body(6);
        let positions: Vec<_> = cells.iter().map(|c| c.relative_pos).collect();
        for _ in 0..20 {
            mutator.apply(MutationKind::ChangeType, &mut cells, &mut rng);
        }
        let after: Vec<_> = cells.iter().map(|c| c.relative_pos).collect();
        assert_eq!(positions, after);
        assert!(cells.iter().all(|c| c.cell_type.is_body_part()));
    }

    proptest! {
        #[test]
        fn prop_mutation_keeps_body_valid(seed in any::<u64>(), rounds in 1usize..200) {
            let mutator = Mutator::with_rate(1.0);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut cells = default_body();

            for _ in 0..rounds {
                cells = mutator.mutate(&cells, &mut rng);
                prop_assert!(validate_body(&cells).is_ok());
                prop_assert!(cells.len() >= 2 && cells.len() <= MAX_ORGANISM_CELLS);
            }
        }
    }
}
