use serde::{Deserialize, Serialize};

pub mod errors;
pub mod tile;
pub mod board;
pub mod carve;
pub mod balance;
pub mod placement;
pub mod level;
pub mod dungeon;
pub mod display;

pub use errors::*;
pub use tile::*;
pub use board::*;
pub use carve::*;
pub use balance::*;
pub use placement::*;
pub use level::*;
pub use dungeon::*;
pub use display::*;

/// Default floor dimensions, in cells
pub const MAP_SIZE_X: i32 = 12;
pub const MAP_SIZE_Y: i32 = 12;

/// Number of floors in a default run
pub const NO_OF_LEVELS: usize = 5;

/// Z-order hints handed to the renderer. Lower layers are drawn first.
pub mod layers {
    pub const UI: i32 = 1;
    pub const BOARD: i32 = 2;
    pub const DEAD: i32 = 3;
    pub const OBJECTS: i32 = 4;
    pub const CREATURES: i32 = 5;
    pub const PLAYER: i32 = 6;
    pub const LOOK: i32 = 7;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev distance, so a radius describes a square around the point
    pub fn chebyshev(&self, other: &Coord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
