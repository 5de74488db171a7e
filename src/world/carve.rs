use rand::Rng;
use super::{Board, Coord};

const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (-1, 0), (1, 0), (0, -1)];

/// Random-walk digger: wanders from a start point, opening every wall it
/// steps on until enough of the board is floor.
#[derive(Debug, Clone, Copy)]
pub struct DrunkardsWalk {
    pub dig_min_percent: u32,
    pub dig_max_percent: u32,
}

impl Default for DrunkardsWalk {
    fn default() -> Self {
        Self {
            dig_min_percent: 60,
            dig_max_percent: 85,
        }
    }
}

impl DrunkardsWalk {
    pub fn new(dig_min_percent: u32, dig_max_percent: u32) -> Self {
        Self {
            dig_min_percent,
            dig_max_percent,
        }
    }

    /// Bounds on how many tiles a single walk opens for a board of `area` tiles.
    pub fn dig_range(&self, area: usize) -> (usize, usize) {
        let unit = area as f64 / 100.0;
        let dig_min = (unit * self.dig_min_percent as f64).round() as usize;
        let dig_max = (unit * self.dig_max_percent as f64).round() as usize;
        (dig_min, dig_max)
    }

    /// Carves `board` starting at `start` and returns where the digger stopped.
    ///
    /// The stop position is always an open tile. A start outside the board
    /// leaves it untouched.
    pub fn carve<R: Rng + ?Sized>(&self, board: &mut Board, start: Coord, rng: &mut R) -> Coord {
        if !board.in_bounds(start) {
            return start;
        }

        let (dig_min, dig_max) = self.dig_range(board.area());
        let mut remaining = rng.gen_range(dig_min..=dig_max).min(board.area());
        let mut cursor = start;

        loop {
            if let Some(tile) = board.get_mut(cursor) {
                if tile.dig() {
                    remaining = remaining.saturating_sub(1);
                }
            }
            if remaining == 0 {
                break;
            }

            let (dx, dy) = DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())];
            let next = cursor.offset(dx, dy);
            // Bumping into the edge just wastes this step
            if board.in_bounds(next) {
                cursor = next;
            }
        }

        cursor
    }
}
