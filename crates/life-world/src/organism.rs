//! Organism state and management.

use life_core::{CellType, Direction, OrganismId, Position, SpeciesColor};
use life_genome::body::{self, OrganismCell};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::RangeInclusive;

/// Ticks between spontaneous direction changes
pub const MOVE_COUNTER_RANGE: RangeInclusive<i32> = 5..=15;

/// Issues organism ids for one simulation. Starts at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganismIdGenerator {
    next: u64,
}

impl OrganismIdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> OrganismId {
        let id = OrganismId(self.next);
        self.next += 1;
        id
    }

    /// Id the next call to `next_id` will return
    pub fn peek(&self) -> OrganismId {
        OrganismId(self.next)
    }

    pub fn reset(&mut self) {
        self.next = 1;
    }
}

impl Default for OrganismIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// An organism in the simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organism {
    pub id: OrganismId,
    pub cells: Vec<OrganismCell>,
    /// Grid origin the cell offsets are relative to
    pub position: Position,
    pub energy: u32,
    pub age: u32,
    pub direction: Direction,
    /// Ticks left until the next spontaneous direction change
    pub move_counter: i32,
    pub color: SpeciesColor,
}

impl Organism {
    /// New organism with zero energy and age, a random heading and a random
    /// species color
    pub fn spawn(
        id: OrganismId,
        position: Position,
        cells: Vec<OrganismCell>,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let color = SpeciesColor::random(rng);
        Self::with_color(id, position, cells, color, rng)
    }

    pub fn with_color(
        id: OrganismId,
        position: Position,
        cells: Vec<OrganismCell>,
        color: SpeciesColor,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        Self {
            id,
            cells,
            position,
            energy: 0,
            age: 0,
            direction: Direction::random(rng),
            move_counter: rng.gen_range(MOVE_COUNTER_RANGE),
            color,
        }
    }

    /// Absolute positions of every cell, in cell order
    pub fn footprint(&self) -> impl Iterator<Item = Position> + '_ {
        self.footprint_at(self.position)
    }

    /// Footprint the organism would have with its origin at `origin`
    pub fn footprint_at(&self, origin: Position) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().map(move |c| c.absolute(origin))
    }

    pub fn footprint_set(&self) -> HashSet<Position> {
        self.footprint().collect()
    }

    pub fn has_cell_type(&self, cell_type: CellType) -> bool {
        body::has_cell_type(&self.cells, cell_type)
    }

    pub fn can_move(&self) -> bool {
        self.has_cell_type(CellType::Mover)
    }

    /// Oldest age this organism survives
    pub fn max_age(&self, lifespan_multiplier: u32) -> u64 {
        self.cells.len() as u64 * lifespan_multiplier as u64
    }

    pub fn is_expired(&self, lifespan_multiplier: u32) -> bool {
        self.age as u64 > self.max_age(lifespan_multiplier)
    }

    /// Energy needed to reproduce: one unit per cell
    pub fn reproduction_threshold(&self) -> u32 {
        self.cells.len() as u32
    }

    pub fn can_reproduce(&self) -> bool {
        self.energy >= self.reproduction_threshold()
    }

    /// Distance an offspring is placed from this organism's origin
    pub fn offspring_distance(&self) -> i32 {
        body::reach(&self.cells) + 3
    }

    pub fn tick(&mut self) {
        self.age += 1;
    }

    /// Count down to the next direction change, picking a new heading when due
    pub fn advance_move_counter(&mut self, rng: &mut ChaCha8Rng) {
        self.move_counter -= 1;
        if self.move_counter <= 0 {
            self.direction = Direction::random(rng);
            self.move_counter = rng.gen_range(MOVE_COUNTER_RANGE);
        }
    }
}
