//! Body plans for organisms.
//!
//! An organism's genome is its body: an ordered list of typed cells placed at
//! offsets from the organism origin. This crate defines that layout, the
//! mutation operators applied on reproduction, and the structural checks a
//! body must pass.

pub mod body;
pub mod mutation;
pub mod validation;

pub use body::OrganismCell;
pub use mutation::{MutationConfig, MutationKind, Mutator};
pub use validation::validate_body;
