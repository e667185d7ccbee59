//! Placement checks: does an organism's footprint fit on the grid?

use crate::grid::Grid;
use crate::organism::Organism;
use life_core::Position;
use std::collections::HashSet;

/// True iff `(x, y)` lies inside a `width` x `height` grid
pub fn is_valid_position(x: i32, y: i32, width: i32, height: i32) -> bool {
    Position::new(x, y).in_bounds(width, height)
}

/// Absolute positions the organism currently covers
pub fn occupied_footprint(organism: &Organism) -> HashSet<Position> {
    organism.footprint_set()
}

/// Whether `candidate` can sit at its current position.
///
/// Fails if any footprint cell is out of bounds, lands on a tile that is
/// neither Empty nor Food, or coincides with a cell of another organism in
/// `organisms`. Organisms sharing the candidate's id are skipped.
pub fn can_place<'a, I>(candidate: &Organism, grid: &Grid, organisms: I) -> bool
where
    I: IntoIterator<Item = &'a Organism>,
{
    can_place_at(candidate, candidate.position, grid, organisms)
}

/// Same as [`can_place`] with the candidate's origin moved to `origin`
pub fn can_place_at<'a, I>(
    candidate: &Organism,
    origin: Position,
    grid: &Grid,
    organisms: I,
) -> bool
where
    I: IntoIterator<Item = &'a Organism>,
{
    let mut footprint = HashSet::with_capacity(candidate.cells.len());
    for pos in candidate.footprint_at(origin) {
        if !grid.is_passable(pos) {
            return false;
        }
        footprint.insert(pos);
    }

    organisms
        .into_iter()
        .filter(|other| other.id != candidate.id)
        .all(|other| other.footprint().all(|pos| !footprint.contains(&pos)))
}
