use serde::{Deserialize, Serialize};
use std::ops::Range;
use super::Board;

/// Acceptance test applied to every freshly carved board.
pub trait LayoutValidator {
    fn is_valid(&self, board: &Board) -> bool;

    /// Lower is better. Used to pick the least bad layout when no attempt
    /// passes within the retry cap.
    fn score(&self, board: &Board) -> f64 {
        if self.is_valid(board) { 0.0 } else { 1.0 }
    }
}

impl<F> LayoutValidator for F
where
    F: Fn(&Board) -> bool,
{
    fn is_valid(&self, board: &Board) -> bool {
        self(board)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomRight,
        Quadrant::BottomLeft,
    ];

    /// Half-open x and y ranges of this quadrant; the four together tile the board.
    pub fn bounds(&self, width: i32, height: i32) -> (Range<i32>, Range<i32>) {
        let mid_x = width / 2;
        let mid_y = height / 2;
        match self {
            Quadrant::TopLeft => (0..mid_x, 0..mid_y),
            Quadrant::TopRight => (mid_x..width, 0..mid_y),
            Quadrant::BottomRight => (mid_x..width, mid_y..height),
            Quadrant::BottomLeft => (0..mid_x, mid_y..height),
        }
    }
}

/// Blocked-tile counts per quadrant and the band they must fall in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadrantReport {
    pub counts: [usize; 4],
    pub average: f64,
    pub min: i64,
    pub max: i64,
}

impl QuadrantReport {
    pub fn is_balanced(&self) -> bool {
        self.counts
            .iter()
            .all(|&count| (count as i64) >= self.min && (count as i64) <= self.max)
    }

    /// Largest distance of any quadrant from the average, as a fraction of it.
    pub fn worst_deviation(&self) -> f64 {
        if self.average <= 0.0 {
            return 0.0;
        }
        self.counts
            .iter()
            .map(|&count| (count as f64 - self.average).abs() / self.average)
            .fold(0.0, f64::max)
    }
}

/// Rejects boards whose walls pile up in one corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadrantBalance {
    pub tolerance: f64,
}

impl Default for QuadrantBalance {
    fn default() -> Self {
        Self { tolerance: 0.20 }
    }
}

impl QuadrantBalance {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn report(&self, board: &Board) -> QuadrantReport {
        let mut counts = [0usize; 4];
        for (i, quadrant) in Quadrant::ALL.iter().enumerate() {
            let (xs, ys) = quadrant.bounds(board.width(), board.height());
            counts[i] = board.blocked_in(xs, ys);
        }

        let sum: usize = counts.iter().sum();
        let average = sum as f64 / counts.len() as f64;
        let spread = average * self.tolerance;

        QuadrantReport {
            counts,
            average,
            min: (average - spread).round() as i64,
            max: (average + spread).round() as i64,
        }
    }
}

impl LayoutValidator for QuadrantBalance {
    fn is_valid(&self, board: &Board) -> bool {
        self.report(board).is_balanced()
    }

    fn score(&self, board: &Board) -> f64 {
        self.report(board).worst_deviation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Coord;

    fn open_rect(board: &mut Board, xs: Range<i32>, ys: Range<i32>) {
        for y in ys {
            for x in xs.clone() {
                board.get_mut(Coord::new(x, y)).unwrap().dig();
            }
        }
    }

    #[test]
    fn test_quadrants_tile_the_board() {
        for (width, height) in [(12, 12), (5, 5), (7, 4), (1, 3)] {
            let mut covered = 0;
            for quadrant in Quadrant::ALL {
                let (xs, ys) = quadrant.bounds(width, height);
                covered += xs.len() * ys.len();
            }
            assert_eq!(covered, (width * height) as usize);
        }
    }

    #[test]
    fn test_uniform_board_is_balanced() {
        let (board, _) = Board::new_blocked(10, 10);
        let report = QuadrantBalance::default().report(&board);
        assert_eq!(report.counts, [25, 25, 25, 25]);
        assert_eq!((report.min, report.max), (20, 30));
        assert!(report.is_balanced());
    }

    #[test]
    fn test_one_open_corner_is_rejected() {
        let (mut board, _) = Board::new_blocked(10, 10);
        open_rect(&mut board, 0..5, 0..5);
        let balance = QuadrantBalance::default();
        let report = balance.report(&board);
        assert_eq!(report.counts, [0, 25, 25, 25]);
        assert_eq!((report.min, report.max), (15, 23));
        assert!(!balance.is_valid(&board));
        assert!(balance.score(&board) > 0.2);
    }

    #[test]
    fn test_small_imbalance_within_tolerance() {
        let (mut board, _) = Board::new_blocked(10, 10);
        // Quadrant counts become 21, 25, 25, 25: average 24, band 19..=29
        open_rect(&mut board, 0..4, 0..1);
        let balance = QuadrantBalance::default();
        assert!(balance.is_valid(&board));
        assert!(balance.is_valid(&board));
    }

    #[test]
    fn test_closure_validator_scores() {
        let always_no = |_: &Board| false;
        let (board, _) = Board::new_blocked(4, 4);
        assert!(!always_no.is_valid(&board));
        assert_eq!(always_no.score(&board), 1.0);
    }
}
