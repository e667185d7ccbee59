//! Structural validation for organism bodies.

use crate::body::OrganismCell;
use life_core::{Error, Result, MAX_ORGANISM_CELLS};
use std::collections::HashSet;

/// Validate that a body is well-formed: non-empty, within the size cap, made
/// of body-part cells only, and with no two cells at the same offset.
pub fn validate_body(cells: &[OrganismCell]) -> Result<()> {
    if cells.is_empty() {
        return Err(Error::InvariantViolation(
            "Organism body has no cells".to_string(),
        ));
    }

    if cells.len() > MAX_ORGANISM_CELLS {
        return Err(Error::InvariantViolation(format!(
            "Organism body has {} cells, limit is {}",
            cells.len(),
            MAX_ORGANISM_CELLS
        )));
    }

    let mut seen = HashSet::with_capacity(cells.len());
    for (idx, cell) in cells.iter().enumerate() {
        if !cell.cell_type.is_body_part() {
            return Err(Error::InvariantViolation(format!(
                "Cell {} has terrain type '{}'",
                idx, cell.cell_type
            )));
        }

        if !seen.insert(cell.relative_pos) {
            return Err(Error::InvariantViolation(format!(
                "Cell {} duplicates relative position {}",
                idx, cell.relative_pos
            )));
        }
    }

    Ok(())
}
