use rand::seq::SliceRandom;
use rand::Rng;
use super::{Coord, PlacementError};

/// Picks distinct coordinates on a `width` x `height` map that satisfy an
/// arbitrary acceptance predicate.
///
/// Positions are drawn uniformly at random and rejected until enough pass.
/// Once `max_attempts` draws have been spent, the remaining positions come
/// from a shuffled scan of the whole map, so near-full maps still finish.
#[derive(Debug, Clone, Copy)]
pub struct Placer {
    pub width: i32,
    pub height: i32,
    pub max_attempts: usize,
}

impl Placer {
    pub fn new(width: i32, height: i32, max_attempts: usize) -> Self {
        Self {
            width,
            height,
            max_attempts,
        }
    }

    /// `accept` sees the candidate and everything placed so far. Candidates
    /// already placed are rejected before `accept` is asked.
    pub fn place<R, F>(&self, count: usize, rng: &mut R, mut accept: F) -> Result<Vec<Coord>, PlacementError>
    where
        R: Rng + ?Sized,
        F: FnMut(Coord, &[Coord]) -> bool,
    {
        let mut placed: Vec<Coord> = Vec::with_capacity(count);
        if count == 0 || self.width <= 0 || self.height <= 0 {
            return self.finish(placed, count);
        }

        let mut attempts = 0;
        while placed.len() < count && attempts < self.max_attempts {
            attempts += 1;
            let candidate = Coord::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height));
            if placed.contains(&candidate) || !accept(candidate, &placed) {
                continue;
            }
            placed.push(candidate);
        }

        if placed.len() < count {
            eprintln!(
                "placement: {} of {} positions after {} draws, scanning the whole map",
                placed.len(),
                count,
                attempts
            );
            let mut candidates: Vec<Coord> = (0..self.height)
                .flat_map(|y| (0..self.width).map(move |x| Coord::new(x, y)))
                .collect();
            candidates.shuffle(rng);

            for candidate in candidates {
                if placed.len() >= count {
                    break;
                }
                if placed.contains(&candidate) || !accept(candidate, &placed) {
                    continue;
                }
                placed.push(candidate);
            }
        }

        self.finish(placed, count)
    }

    fn finish(&self, placed: Vec<Coord>, requested: usize) -> Result<Vec<Coord>, PlacementError> {
        if placed.len() < requested {
            return Err(PlacementError::NotEnoughSpace {
                requested,
                placed: placed.len(),
            });
        }
        Ok(placed)
    }
}
