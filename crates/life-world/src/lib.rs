//! World simulation engine.
//!
//! This crate implements the bounded 2D grid, the organisms living on it, the
//! per-tick update rules and the controller that owns a running simulation.

pub mod engine;
pub mod grid;
pub mod organism;
pub mod placement;
pub mod simulation;
pub mod state;

pub use engine::update_simulation;
pub use grid::Grid;
pub use organism::{Organism, OrganismIdGenerator};
pub use simulation::{init_simulation, reset_simulation, Simulation};
pub use state::SimulationState;
