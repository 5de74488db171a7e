use serde::{Deserialize, Serialize};
use std::ops::Range;
use super::{layers, Coord, ConstructionWarning, Tile, TileStyle};

/// One floor of the dungeon: a fully populated rectangle of tiles.
///
/// Tiles are stored row-major (`tiles[y][x]`). The stairs coordinate is kept
/// on the board itself, so a floor never carries more than one descent point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    width: i32,
    height: i32,
    tiles: Vec<Vec<Tile>>,
    stairs: Option<Coord>,
}

impl Board {
    /// Creates a board where every tile is solid wall.
    ///
    /// Dimensions are checked by the configuration before generation starts;
    /// per-tile construction warnings are collected and handed back.
    pub fn new_blocked(width: i32, height: i32) -> (Self, Vec<ConstructionWarning>) {
        let mut warnings = Vec::new();
        let mut tiles = Vec::with_capacity(height.max(0) as usize);

        for y in 0..height {
            let mut row = Vec::with_capacity(width.max(0) as usize);
            for x in 0..width {
                let (tile, tile_warnings) = Tile::new(
                    Coord::new(x, y),
                    layers::BOARD,
                    TileStyle::wall(),
                    true,
                    false,
                    (width, height),
                );
                warnings.extend(tile_warnings);
                row.push(tile);
            }
            tiles.push(row);
        }

        let board = Board {
            width,
            height,
            tiles,
            stairs: None,
        };
        (board, warnings)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn area(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    pub fn center(&self) -> Coord {
        Coord::new(self.width / 2, self.height / 2)
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    pub fn get(&self, coord: Coord) -> Option<&Tile> {
        if !self.in_bounds(coord) {
            return None;
        }
        self.tiles.get(coord.y as usize).and_then(|row| row.get(coord.x as usize))
    }

    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Tile> {
        if !self.in_bounds(coord) {
            return None;
        }
        self.tiles.get_mut(coord.y as usize).and_then(|row| row.get_mut(coord.x as usize))
    }

    /// Anything outside the map counts as blocked.
    pub fn is_blocked(&self, coord: Coord) -> bool {
        self.get(coord).map(|tile| tile.blocked).unwrap_or(true)
    }

    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.tiles
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().flatten()
    }

    /// Every coordinate of the board, row by row.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coord::new(x, y)))
    }

    pub fn stairs(&self) -> Option<Coord> {
        self.stairs
    }

    /// Turns `coord` into the descent point of this floor.
    ///
    /// A previously marked stairs tile is reverted to plain floor, keeping the
    /// one-stairs-per-board invariant. Returns false if `coord` is off the map.
    pub fn set_stairs(&mut self, coord: Coord) -> bool {
        if !self.in_bounds(coord) {
            return false;
        }
        if let Some(previous) = self.stairs.take() {
            let bounds = (self.width, self.height);
            if let Some(tile) = self.get_mut(previous) {
                *tile = Tile::new(previous, layers::BOARD, TileStyle::floor(), false, false, bounds).0;
            }
        }
        if let Some(tile) = self.get_mut(coord) {
            tile.mark_stairs();
        }
        self.stairs = Some(coord);
        true
    }

    pub fn blocked_count(&self) -> usize {
        self.tiles().filter(|tile| tile.blocked).count()
    }

    pub fn open_count(&self) -> usize {
        self.area() - self.blocked_count()
    }

    /// Blocked tiles inside the half-open rectangle `xs` by `ys`.
    pub fn blocked_in(&self, xs: Range<i32>, ys: Range<i32>) -> usize {
        let mut count = 0;
        for y in ys {
            for x in xs.clone() {
                if self.is_blocked(Coord::new(x, y)) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Positions of every resource deposit, drained or not.
    pub fn resource_positions(&self) -> Vec<Coord> {
        self.tiles()
            .filter(|tile| tile.has_resource())
            .map(|tile| tile.position)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_fully_populated_and_blocked() {
        let (board, warnings) = Board::new_blocked(12, 10);
        assert!(warnings.is_empty());
        assert_eq!(board.rows().len(), 10);
        assert!(board.rows().iter().all(|row| row.len() == 12));
        assert_eq!(board.area(), 120);
        assert_eq!(board.blocked_count(), 120);
        assert_eq!(board.stairs(), None);

        for coord in board.coords() {
            let tile = board.get(coord).unwrap();
            assert_eq!(tile.position, coord);
            assert!(tile.blocked);
        }
    }

    #[test]
    fn test_out_of_bounds_lookups() {
        let (board, _) = Board::new_blocked(4, 4);
        assert!(board.get(Coord::new(4, 0)).is_none());
        assert!(board.get(Coord::new(0, -1)).is_none());
        assert!(board.is_blocked(Coord::new(-1, -1)));
        assert_eq!(board.center(), Coord::new(2, 2));
    }

    #[test]
    fn test_stairs_are_unique() {
        let (mut board, _) = Board::new_blocked(6, 6);
        assert!(board.set_stairs(Coord::new(1, 1)));
        assert!(board.set_stairs(Coord::new(4, 3)));
        assert!(!board.set_stairs(Coord::new(6, 0)));

        let stairs: Vec<Coord> = board.tiles().filter(|t| t.is_stairs()).map(|t| t.position).collect();
        assert_eq!(stairs, vec![Coord::new(4, 3)]);
        assert_eq!(board.stairs(), Some(Coord::new(4, 3)));
        assert!(!board.is_blocked(Coord::new(1, 1)));
    }

    #[test]
    fn test_blocked_in_half_open_ranges() {
        let (mut board, _) = Board::new_blocked(4, 4);
        board.get_mut(Coord::new(0, 0)).unwrap().dig();
        board.get_mut(Coord::new(2, 2)).unwrap().dig();
        assert_eq!(board.blocked_in(0..2, 0..2), 3);
        assert_eq!(board.blocked_in(2..4, 2..4), 3);
        assert_eq!(board.blocked_in(2..4, 0..2), 4);
        assert_eq!(board.open_count(), 2);
    }
}
