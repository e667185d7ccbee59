//! Core type definitions for the simulation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an organism instance.
///
/// Ids are issued by a per-simulation generator and are monotonic within
/// one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrganismId(pub u64);

impl fmt::Display for OrganismId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 2D position in the world.
///
/// Used both for absolute grid coordinates and for cell offsets relative to
/// an organism's origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Translate by a relative offset
    pub fn translate(&self, offset: Position) -> Self {
        self.add(offset.x, offset.y)
    }

    /// Step `distance` tiles in `direction`
    pub fn step(&self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.to_delta();
        self.add(dx * distance, dy * distance)
    }

    /// Manhattan distance from the origin
    pub fn manhattan_length(&self) -> i32 {
        self.x.abs() + self.y.abs()
    }

    /// Manhattan distance to another position
    pub fn manhattan_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Orthogonal neighbors in scan order: left, right, up, down
    pub fn orthogonal_neighbors(&self) -> [Position; 4] {
        [
            self.add(-1, 0),
            self.add(1, 0),
            self.add(0, -1),
            self.add(0, 1),
        ]
    }

    /// True iff the position lies inside a `width` x `height` grid
    pub fn in_bounds(&self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.x < width && self.y >= 0 && self.y < height
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Direction for movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Uniformly random direction
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::all()[rng.gen_range(0..4)]
    }
}

/// Content of a grid tile or of one organism cell slot.
///
/// `Empty`, `Food` and `Wall` live in the grid. The remaining variants only
/// appear in organism bodies and are never written into the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    #[default]
    Empty,
    Food,
    Wall,
    Mouth,
    Producer,
    Mover,
    Killer,
}

impl CellType {
    /// Cell types an organism body can be built from
    pub const BODY_PARTS: [CellType; 4] = [
        CellType::Mouth,
        CellType::Producer,
        CellType::Mover,
        CellType::Killer,
    ];

    /// Grid-resident types
    pub fn is_terrain(&self) -> bool {
        matches!(self, CellType::Empty | CellType::Food | CellType::Wall)
    }

    pub fn is_body_part(&self) -> bool {
        !self.is_terrain()
    }

    /// Whether an organism cell may sit on a tile of this type
    pub fn is_passable(&self) -> bool {
        matches!(self, CellType::Empty | CellType::Food)
    }

    /// Uniformly random body part
    pub fn random_body_part<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::BODY_PARTS[rng.gen_range(0..Self::BODY_PARTS.len())]
    }

    pub fn name(&self) -> &'static str {
        match self {
            CellType::Empty => "empty",
            CellType::Food => "food",
            CellType::Wall => "wall",
            CellType::Mouth => "mouth",
            CellType::Producer => "producer",
            CellType::Mover => "mover",
            CellType::Killer => "killer",
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Species tint shared along a lineage. Purely visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpeciesColor {
    pub hue: u16,
}

impl SpeciesColor {
    pub const SATURATION: u8 = 70;
    pub const LIGHTNESS: u8 = 50;

    pub fn new(hue: u16) -> Self {
        Self { hue }
    }

    /// Random hue in 0..=360
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            hue: rng.gen_range(0..=360),
        }
    }
}

impl fmt::Display for SpeciesColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue,
            Self::SATURATION,
            Self::LIGHTNESS
        )
    }
}
