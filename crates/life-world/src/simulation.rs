//! Simulation controller: world setup, reset and the stepping handle.

use crate::engine::update_simulation;
use crate::organism::{Organism, OrganismIdGenerator};
use crate::placement;
use crate::state::SimulationState;
use life_core::{
    CellType, ConfigUpdate, Error, OrganismId, PopulationStats, Position, Result,
    SimulationConfig,
};
use life_genome::body::{default_body, OrganismCell};
use life_genome::validate_body;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument};

/// Distance from each edge kept clear when seeding organisms
const SPAWN_MARGIN: i32 = 5;

/// Fraction of tiles that receive a food placement attempt at init
const INITIAL_FOOD_DENSITY: f64 = 0.05;

/// Build a fresh world: scattered default organisms plus initial food.
///
/// Organisms whose footprint does not fit are dropped, so the initial
/// population can be smaller than `config.initial_organisms`. Food attempts
/// that land on a non-empty tile are skipped.
pub fn init_simulation(
    config: &SimulationConfig,
    rng: &mut ChaCha8Rng,
    ids: &mut OrganismIdGenerator,
) -> SimulationState {
    let mut state = SimulationState::empty(config.width, config.height);

    for _ in 0..config.initial_organisms {
        let x = spawn_coordinate(config.width, rng);
        let y = spawn_coordinate(config.height, rng);
        let organism = Organism::spawn(ids.next_id(), Position::new(x, y), default_body(), rng);

        if placement::can_place(&organism, &state.grid, &state.organisms) {
            state.organisms.push(organism);
        }
    }

    if !state.grid.is_empty() {
        let attempts = (state.grid.len() as f64 * INITIAL_FOOD_DENSITY).ceil() as usize;
        for _ in 0..attempts {
            let pos = state.grid.random_position(rng);
            if state.grid.is(pos, CellType::Empty) {
                state.grid.set(pos, CellType::Food);
            }
        }
    }

    debug!(
        requested = config.initial_organisms,
        placed = state.organisms.len(),
        food = state.grid.count(CellType::Food),
        "World initialized"
    );

    state
}

/// Restart organism ids at 1 and build a fresh world
pub fn reset_simulation(
    config: &SimulationConfig,
    rng: &mut ChaCha8Rng,
    ids: &mut OrganismIdGenerator,
) -> SimulationState {
    ids.reset();
    init_simulation(config, rng, ids)
}

/// Uniform coordinate in `[5, extent - 5]`, collapsed onto the grid when the
/// extent is too small for the margin
fn spawn_coordinate(extent: i32, rng: &mut ChaCha8Rng) -> i32 {
    let lo = SPAWN_MARGIN.min(extent - 1).max(0);
    let hi = (extent - SPAWN_MARGIN).max(lo);
    rng.gen_range(lo..=hi)
}

/// Owns one simulation: config, current state, random source and id counter
pub struct Simulation {
    config: SimulationConfig,
    state: SimulationState,
    rng: ChaCha8Rng,
    ids: OrganismIdGenerator,
}

impl Simulation {
    /// New simulation seeded from OS entropy
    pub fn new(config: SimulationConfig) -> Result<Self> {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// New simulation with a reproducible random stream
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(config: SimulationConfig, mut rng: ChaCha8Rng) -> Result<Self> {
        config.validate()?;

        let mut ids = OrganismIdGenerator::new();
        let state = init_simulation(&config, &mut rng, &mut ids);

        info!(
            width = config.width,
            height = config.height,
            organisms = state.population(),
            max_organisms = config.max_organisms,
            "Simulation created"
        );

        Ok(Self {
            config,
            state,
            rng,
            ids,
        })
    }

    /// Advance one tick
    pub fn step(&mut self) -> &SimulationState {
        let state = std::mem::take(&mut self.state);
        self.state = update_simulation(state, &self.config, &mut self.rng, &mut self.ids);
        &self.state
    }

    /// Advance `ticks` ticks, stopping early if the population dies out
    #[instrument(skip(self))]
    pub fn run(&mut self, ticks: u64) -> PopulationStats {
        for _ in 0..ticks {
            self.step();

            if self.state.tick % 1000 == 0 {
                info!(
                    "Tick {}: {} organisms alive, generation {}",
                    self.state.tick,
                    self.state.population(),
                    self.state.generation
                );
            }

            if self.state.organisms.is_empty() {
                info!(tick = self.state.tick, "Population extinct");
                break;
            }
        }

        self.stats()
    }

    /// Discard the world and build a new one from the current config.
    /// Always leaves the simulation paused.
    pub fn reset(&mut self) -> &SimulationState {
        self.state = reset_simulation(&self.config, &mut self.rng, &mut self.ids);
        info!(organisms = self.state.population(), "Simulation reset");
        &self.state
    }

    pub fn start(&mut self) {
        self.state.running = true;
    }

    pub fn pause(&mut self) {
        self.state.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn stats(&self) -> PopulationStats {
        self.state.stats()
    }

    /// Apply a settings change between ticks. Grid dimensions take effect on
    /// the next reset.
    pub fn update_config(&mut self, update: &ConfigUpdate) -> Result<()> {
        let mut config = self.config.clone();
        config.apply(update);
        config.validate()?;

        debug!(
            mutation_rate = config.mutation_rate,
            food_spawn_rate = config.food_spawn_rate,
            max_organisms = config.max_organisms,
            "Config updated"
        );
        self.config = config;
        Ok(())
    }

    /// Set one terrain tile
    pub fn paint(&mut self, position: Position, tile: CellType) -> Result<()> {
        if !tile.is_terrain() {
            return Err(Error::Validation(format!(
                "Cannot paint organism cell '{}' onto the grid",
                tile
            )));
        }
        if !self.state.grid.in_bounds(position) {
            return Err(Error::Validation(format!(
                "Position {} is outside the {}x{} grid",
                position, self.state.width, self.state.height
            )));
        }
        if tile == CellType::Wall {
            if let Some(organism) = self
                .state
                .organisms
                .iter()
                .find(|o| o.footprint().any(|p| p == position))
            {
                return Err(Error::Placement(format!(
                    "Wall at {} would cover organism {}",
                    position, organism.id
                )));
            }
        }

        self.state.grid.set(position, tile);
        Ok(())
    }

    /// Insert an organism with the given body at `position`
    pub fn place_organism(
        &mut self,
        position: Position,
        cells: Vec<OrganismCell>,
    ) -> Result<OrganismId> {
        validate_body(&cells)?;

        if self.state.population() >= self.config.max_organisms {
            return Err(Error::Placement(format!(
                "Population cap of {} reached",
                self.config.max_organisms
            )));
        }

        let organism = Organism::spawn(self.ids.peek(), position, cells, &mut self.rng);
        if !placement::can_place(&organism, &self.state.grid, &self.state.organisms) {
            return Err(Error::Placement(format!(
                "Organism does not fit at {}",
                position
            )));
        }

        let id = self.ids.next_id();
        debug!(organism_id = %id, x = position.x, y = position.y, "Organism placed");
        self.state.organisms.push(organism);
        Ok(id)
    }
}
