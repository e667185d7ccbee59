//! Body layout for organisms.

use life_core::{CellType, Position};
use serde::{Deserialize, Serialize};

/// One typed cell of an organism, placed relative to the organism origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganismCell {
    pub cell_type: CellType,
    pub relative_pos: Position,
}

impl OrganismCell {
    pub fn new(cell_type: CellType, relative_pos: Position) -> Self {
        Self {
            cell_type,
            relative_pos,
        }
    }

    pub fn at(cell_type: CellType, x: i32, y: i32) -> Self {
        Self::new(cell_type, Position::new(x, y))
    }

    /// Absolute grid position of this cell for an organism at `origin`
    pub fn absolute(&self, origin: Position) -> Position {
        origin.translate(self.relative_pos)
    }
}

/// Body every spawned organism starts with: a mouth with a mover to its right
pub fn default_body() -> Vec<OrganismCell> {
    vec![
        OrganismCell::new(CellType::Mouth, Position::ORIGIN),
        OrganismCell::at(CellType::Mover, 1, 0),
    ]
}

/// Whether any cell sits at `relative_pos`
pub fn occupies(cells: &[OrganismCell], relative_pos: Position) -> bool {
    cells.iter().any(|c| c.relative_pos == relative_pos)
}

pub fn has_cell_type(cells: &[OrganismCell], cell_type: CellType) -> bool {
    cells.iter().any(|c| c.cell_type == cell_type)
}

/// Largest Manhattan distance of any cell from the origin
pub fn reach(cells: &[OrganismCell]) -> i32 {
    cells
        .iter()
        .map(|c| c.relative_pos.manhattan_length())
        .max()
        .unwrap_or(0)
}
