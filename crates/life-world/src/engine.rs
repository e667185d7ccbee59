//! Tick engine: advances a simulation state by one step.
//!
//! Organisms are processed sequentially in list order and each one sees the
//! effects of those processed before it in the same tick (moves, eaten food,
//! offspring). Organisms that die keep their slot, and keep blocking
//! placement, until the tick commits.

use crate::grid::Grid;
use crate::organism::{Organism, OrganismIdGenerator};
use crate::placement;
use crate::state::SimulationState;
use life_core::{CellType, Direction, Position, SimulationConfig, SpeciesColor};
use life_genome::Mutator;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

/// Chance per tick that a producer cell drops food next to itself
pub const PRODUCER_FOOD_CHANCE: f64 = 0.02;

/// Chance that an offspring gets a fresh species color instead of its parent's
pub const COLOR_MUTATION_CHANCE: f64 = 0.1;

/// Advance `state` by one tick and return the next state.
///
/// All randomness is drawn from `rng`; replaying the same rng stream over the
/// same input state yields an identical result. Offspring take their ids
/// from `ids`.
pub fn update_simulation(
    state: SimulationState,
    config: &SimulationConfig,
    rng: &mut ChaCha8Rng,
    ids: &mut OrganismIdGenerator,
) -> SimulationState {
    debug_assert!(
        state.validate().is_ok(),
        "invalid simulation state: {:?}",
        state.validate().err()
    );

    let SimulationState {
        grid,
        organisms,
        width,
        height,
        generation,
        tick,
        running,
    } = state;

    let mut step = TickStep {
        tick: tick + 1,
        alive: vec![true; organisms.len()],
        starting_population: organisms.len(),
        grid,
        organisms,
        offspring: Vec::new(),
        mutator: Mutator::with_rate(config.mutation_rate),
        config,
        rng,
        ids,
    };

    step.spawn_food();
    for idx in 0..step.organisms.len() {
        step.process_organism(idx);
    }

    let births = step.offspring.len();
    let (grid, organisms) = step.commit();

    SimulationState {
        grid,
        organisms,
        width,
        height,
        generation: if births > 0 { generation + 1 } else { generation },
        tick: tick + 1,
        running,
    }
}

/// Working set for one tick
struct TickStep<'a> {
    /// Tick being computed, for log fields
    tick: u64,
    grid: Grid,
    organisms: Vec<Organism>,
    alive: Vec<bool>,
    offspring: Vec<Organism>,
    starting_population: usize,
    mutator: Mutator,
    config: &'a SimulationConfig,
    rng: &'a mut ChaCha8Rng,
    ids: &'a mut OrganismIdGenerator,
}

impl TickStep<'_> {
    /// One Bernoulli trial with p = rate * width * height; on success a random
    /// empty tile becomes food. A product >= 1 fires every tick.
    fn spawn_food(&mut self) {
        let chance = self.config.food_spawn_rate * self.grid.width as f64 * self.grid.height as f64;
        if self.grid.is_empty() || self.rng.gen::<f64>() >= chance {
            return;
        }

        let pos = self.grid.random_position(self.rng);
        if self.grid.is(pos, CellType::Empty) {
            self.grid.set(pos, CellType::Food);
        }
    }

    fn process_organism(&mut self, idx: usize) {
        let organism = &mut self.organisms[idx];
        organism.tick();

        if organism.is_expired(self.config.lifespan_multiplier) {
            self.die(idx);
            return;
        }

        self.run_cells(idx);
        self.move_organism(idx);
        self.reproduce(idx);
    }

    /// Every in-bounds footprint tile becomes food
    fn die(&mut self, idx: usize) {
        let organism = &self.organisms[idx];
        for pos in organism.footprint() {
            self.grid.set(pos, CellType::Food);
        }
        self.alive[idx] = false;

        debug!(
            tick = self.tick,
            organism_id = %organism.id,
            age = organism.age,
            cells = organism.cells.len(),
            "Organism died"
        );
    }

    fn run_cells(&mut self, idx: usize) {
        let organism = &mut self.organisms[idx];
        let origin = organism.position;

        for cell in &organism.cells {
            let pos = cell.absolute(origin);
            if !self.grid.in_bounds(pos) {
                continue;
            }

            match cell.cell_type {
                CellType::Mouth => {
                    // First adjacent food only, scanning left, right, up, down
                    if let Some(food) = pos
                        .orthogonal_neighbors()
                        .into_iter()
                        .find(|n| self.grid.is(*n, CellType::Food))
                    {
                        self.grid.set(food, CellType::Empty);
                        organism.energy += 1;
                    }
                }
                CellType::Producer => {
                    if self.rng.gen::<f64>() < PRODUCER_FOOD_CHANCE {
                        let empty: Vec<Position> = pos
                            .orthogonal_neighbors()
                            .into_iter()
                            .filter(|n| self.grid.is(*n, CellType::Empty))
                            .collect();
                        if let Some(target) = empty.choose(self.rng) {
                            self.grid.set(*target, CellType::Food);
                        }
                    }
                }
                // Killer cells have no effect yet
                CellType::Killer => {}
                _ => {}
            }
        }
    }

    fn move_organism(&mut self, idx: usize) {
        if !self.organisms[idx].can_move() {
            return;
        }

        self.organisms[idx].advance_move_counter(self.rng);

        let organism = &self.organisms[idx];
        let candidate = organism.position.step(organism.direction, 1);
        let fits = placement::can_place_at(
            organism,
            candidate,
            &self.grid,
            self.organisms.iter().chain(self.offspring.iter()),
        );

        let organism = &mut self.organisms[idx];
        if fits {
            organism.position = candidate;
        } else {
            // Bounce
            organism.direction = Direction::random(self.rng);
        }
    }

    fn reproduce(&mut self, idx: usize) {
        let has_room = self.starting_population + self.offspring.len() < self.config.max_organisms;
        if !self.organisms[idx].can_reproduce() || !has_room {
            return;
        }

        let parent = &mut self.organisms[idx];
        parent.energy = 0;

        let cells = self.mutator.mutate(&parent.cells, self.rng);
        let direction = Direction::random(self.rng);
        let origin = parent.position.step(direction, parent.offspring_distance());
        let color = if self.rng.gen::<f64>() < COLOR_MUTATION_CHANCE {
            SpeciesColor::random(self.rng)
        } else {
            parent.color
        };
        let parent_id = parent.id;

        let child = Organism::with_color(self.ids.next_id(), origin, cells, color, self.rng);

        if placement::can_place(
            &child,
            &self.grid,
            self.organisms.iter().chain(self.offspring.iter()),
        ) {
            trace!(
                tick = self.tick,
                parent_id = %parent_id,
                child_id = %child.id,
                cells = child.cells.len(),
                x = origin.x,
                y = origin.y,
                "Offspring born"
            );
            self.offspring.push(child);
        } else {
            trace!(
                tick = self.tick,
                parent_id = %parent_id,
                x = origin.x,
                y = origin.y,
                "Offspring discarded: placement blocked"
            );
        }
    }

    /// Drop the dead and append the newborn
    fn commit(self) -> (Grid, Vec<Organism>) {
        let TickStep {
            grid,
            organisms,
            alive,
            offspring,
            ..
        } = self;

        let mut next: Vec<Organism> = organisms
            .into_iter()
            .zip(alive)
            .filter_map(|(organism, alive)| alive.then_some(organism))
            .collect();
        next.extend(offspring);

        (grid, next)
    }
}
