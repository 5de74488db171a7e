use serde::{Deserialize, Serialize};
use rand::Rng;
use crate::config::{CountRange, GenerationConfig};
use super::{
    Board, Coord, DrunkardsWalk, GenerationError, LayoutValidator, PlacementError, Placer,
    QuadrantBalance, ResourceKind,
};

/// One accepted floor together with where the digger entered it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub number: usize,
    pub board: Board,
    pub start: Coord,
    /// Carve attempts spent before this layout was accepted
    pub attempts: usize,
}

impl Level {
    /// Stairs coordinate. The factory marks stairs on every level it returns.
    pub fn stairs(&self) -> Coord {
        self.board.stairs().unwrap_or(self.start)
    }
}

/// Builds single floors: carve, validate, retry, then mark stairs and
/// scatter resources.
pub struct LevelFactory<V: LayoutValidator = QuadrantBalance> {
    pub width: i32,
    pub height: i32,
    pub walker: DrunkardsWalk,
    pub validator: V,
    pub max_attempts: usize,
    pub resources: CountRange,
    pub max_placement_attempts: usize,
    pub verbose: bool,
}

impl LevelFactory<QuadrantBalance> {
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::with_validator(config, config.balance())
    }
}

impl<V: LayoutValidator> LevelFactory<V> {
    pub fn with_validator(config: &GenerationConfig, validator: V) -> Self {
        Self {
            width: config.width,
            height: config.height,
            walker: config.walker(),
            validator,
            max_attempts: config.max_layout_attempts,
            resources: config.resources,
            max_placement_attempts: config.max_placement_attempts,
            verbose: false,
        }
    }

    pub fn build_level<R: Rng + ?Sized>(
        &self,
        number: usize,
        start: Coord,
        rng: &mut R,
    ) -> Result<Level, GenerationError> {
        if start.x < 0 || start.x >= self.width || start.y < 0 || start.y >= self.height {
            return Err(GenerationError::StartOutOfBounds { start });
        }

        let (mut board, stairs, attempts) = self.carve_balanced(number, start, rng);
        board.set_stairs(stairs);

        self.distribute_resources(&mut board, start, rng)
            .map_err(|source| GenerationError::Resources { level: number, source })?;

        Ok(Level {
            number,
            board,
            start,
            attempts,
        })
    }

    /// Rebuilds the board from scratch until the validator accepts it.
    ///
    /// After `max_attempts` rejections the attempt with the best score wins.
    fn carve_balanced<R: Rng + ?Sized>(&self, number: usize, start: Coord, rng: &mut R) -> (Board, Coord, usize) {
        let mut best: Option<(f64, Board, Coord)> = None;

        for attempt in 1..=self.max_attempts {
            let (mut board, warnings) = Board::new_blocked(self.width, self.height);
            for warning in &warnings {
                eprintln!("level {}: tile warning: {}", number, warning);
            }

            let end = self.walker.carve(&mut board, start, rng);
            if self.validator.is_valid(&board) {
                if self.verbose {
                    eprintln!("level {}: layout accepted after {} attempt(s)", number, attempt);
                }
                return (board, end, attempt);
            }

            let score = self.validator.score(&board);
            if best.as_ref().map_or(true, |(best_score, _, _)| score < *best_score) {
                best = Some((score, board, end));
            }
        }

        match best {
            Some((score, board, end)) => {
                eprintln!(
                    "level {}: no balanced layout in {} attempts, keeping best (score {:.3})",
                    number, self.max_attempts, score
                );
                (board, end, self.max_attempts)
            }
            None => {
                // Only reachable with a zero attempt cap, which config validation forbids
                let (mut board, _) = Board::new_blocked(self.width, self.height);
                let end = self.walker.carve(&mut board, start, rng);
                (board, end, 1)
            }
        }
    }

    /// Drops a few ammunition deposits on open floor, away from the start
    /// point and the stairs.
    pub fn distribute_resources<R: Rng + ?Sized>(
        &self,
        board: &mut Board,
        start: Coord,
        rng: &mut R,
    ) -> Result<Vec<Coord>, PlacementError> {
        let count = self.resources.roll(rng);
        let placer = Placer::new(board.width(), board.height(), self.max_placement_attempts);

        let positions = {
            let view = &*board;
            placer.place(count, rng, |coord, _| {
                coord != start
                    && view
                        .get(coord)
                        .map(|tile| !tile.blocked && !tile.has_resource() && !tile.is_stairs())
                        .unwrap_or(false)
            })?
        };

        for &coord in &positions {
            let kind = ResourceKind::random(rng);
            if let Some(tile) = board.get_mut(coord) {
                tile.place_resource(kind);
            }
        }

        Ok(positions)
    }
}
