//! 2D bounded grid holding the world terrain.

use life_core::{CellType, Error, Position, Result};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A bounded `height` x `width` grid of terrain tiles.
///
/// Only `Empty`, `Food` and `Wall` are stored here. Organism cells are kept
/// on the organisms themselves and overlaid by consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    tiles: Vec<CellType>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            tiles: vec![CellType::Empty; Self::area(width, height)],
        }
    }

    /// Tile count for the given dimensions; non-positive sides give zero
    pub fn area(width: i32, height: i32) -> usize {
        width.max(0) as usize * height.max(0) as usize
    }

    /// Build a grid from row-major rows (`rows[y][x]`)
    pub fn from_rows(rows: Vec<Vec<CellType>>) -> Result<Self> {
        let height = rows.len() as i32;
        let width = rows.first().map(|r| r.len()).unwrap_or(0) as i32;

        let mut tiles = Vec::with_capacity(Self::area(width, height));
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() as i32 != width {
                return Err(Error::InvariantViolation(format!(
                    "Row {} has {} tiles, expected {}",
                    y,
                    row.len(),
                    width
                )));
            }
            if let Some(cell) = row.iter().find(|c| !c.is_terrain()) {
                return Err(Error::Validation(format!(
                    "Row {} holds non-terrain tile '{}'",
                    y, cell
                )));
            }
            tiles.extend(row);
        }

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Row-major copy of the grid, as consumed by renderers
    pub fn rows(&self) -> Vec<Vec<CellType>> {
        if self.width <= 0 {
            return Vec::new();
        }
        self.tiles
            .chunks(self.width as usize)
            .map(|row| row.to_vec())
            .collect()
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.in_bounds(self.width, self.height)
    }

    /// Tile at position, `None` when out of bounds
    pub fn get(&self, pos: Position) -> Option<CellType> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.tiles[self.pos_to_index(pos)])
    }

    /// Set tile at position. Out-of-bounds writes are ignored and return false.
    pub fn set(&mut self, pos: Position, tile: CellType) -> bool {
        debug_assert!(tile.is_terrain(), "organism cell '{}' written to grid", tile);
        if !self.in_bounds(pos) {
            return false;
        }
        let index = self.pos_to_index(pos);
        self.tiles[index] = tile;
        true
    }

    pub fn is(&self, pos: Position, tile: CellType) -> bool {
        self.get(pos) == Some(tile)
    }

    /// Whether an organism cell may occupy this tile
    pub fn is_passable(&self, pos: Position) -> bool {
        self.get(pos).map_or(false, |t| t.is_passable())
    }

    /// Uniformly random position inside the grid
    pub fn random_position(&self, rng: &mut ChaCha8Rng) -> Position {
        Position::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }

    /// Number of tiles of the given type
    pub fn count(&self, tile: CellType) -> usize {
        self.tiles.iter().filter(|t| **t == tile).count()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let width = self.width as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }

    /// Iterator over all tiles with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellType)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| (self.index_to_pos(i), *tile))
    }
}
