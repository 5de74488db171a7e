use rand::Rng;
use crate::config::{CountRange, GenerationConfig};
use crate::world::{Board, Coord, GenerationError, Placer};
use super::{CreatureLoader, Monster};

/// Where monsters may not appear on a given floor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnExclusion {
    /// First floor: a square of half-width `radius` around the player's entry
    EntryZone { center: Coord, radius: i32 },
    /// Deeper floors: the cell the player just came down through
    PreviousStairs(Coord),
    None,
}

impl SpawnExclusion {
    /// Exclusion for floor `level`, given the stairs of the floor above it.
    pub fn for_level(level: usize, start: Coord, radius: i32, previous_stairs: Option<Coord>) -> Self {
        if level == 0 {
            return SpawnExclusion::EntryZone { center: start, radius };
        }
        match previous_stairs {
            Some(stairs) => SpawnExclusion::PreviousStairs(stairs),
            None => SpawnExclusion::None,
        }
    }

    pub fn excludes(&self, coord: Coord) -> bool {
        match self {
            SpawnExclusion::EntryZone { center, radius } => coord.chebyshev(center) <= *radius,
            SpawnExclusion::PreviousStairs(stairs) => coord == *stairs,
            SpawnExclusion::None => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SpawnRules {
    pub monsters: CountRange,
    pub exclusion_radius: i32,
    pub max_attempts: usize,
}

impl SpawnRules {
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            monsters: config.monsters,
            exclusion_radius: config.spawn_exclusion_radius,
            max_attempts: config.max_placement_attempts,
        }
    }

    /// Populates one finished floor.
    ///
    /// Monsters never share a cell, never stand on walls or on this floor's
    /// stairs, and respect the floor's [`SpawnExclusion`].
    pub fn spawn_level<L, R>(
        &self,
        level: usize,
        board: &Board,
        start: Coord,
        previous_stairs: Option<Coord>,
        loader: &L,
        rng: &mut R,
    ) -> Result<Vec<Monster>, GenerationError>
    where
        L: CreatureLoader,
        R: Rng + ?Sized,
    {
        let exclusion = SpawnExclusion::for_level(level, start, self.exclusion_radius, previous_stairs);
        let count = self.monsters.roll(rng);
        let placer = Placer::new(board.width(), board.height(), self.max_attempts);

        let positions = placer
            .place(count, rng, |coord, _| {
                !exclusion.excludes(coord) && !board.is_blocked(coord) && board.stairs() != Some(coord)
            })
            .map_err(|source| GenerationError::Spawns { level, source })?;

        let bounds = (board.width(), board.height());
        let mut monsters = Vec::with_capacity(positions.len());
        for position in positions {
            let (monster, warnings) = loader.create(position, bounds, rng)?;
            for warning in &warnings {
                eprintln!("level {}: monster warning: {}", level, warning);
            }
            monsters.push(monster);
        }

        Ok(monsters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monsters::TemplateLibrary;
    use crate::world::LevelFactory;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn open_board() -> Board {
        let (mut board, _) = Board::new_blocked(12, 12);
        for coord in board.coords().collect::<Vec<_>>() {
            board.get_mut(coord).unwrap().dig();
        }
        board
    }

    #[test]
    fn test_entry_zone_is_a_square() {
        let zone = SpawnExclusion::for_level(0, Coord::new(6, 6), 2, None);
        assert!(zone.excludes(Coord::new(4, 8)));
        assert!(zone.excludes(Coord::new(6, 6)));
        assert!(!zone.excludes(Coord::new(3, 6)));
        assert!(!zone.excludes(Coord::new(9, 9)));
    }

    #[test]
    fn test_deeper_floors_only_exclude_previous_stairs() {
        let zone = SpawnExclusion::for_level(2, Coord::new(6, 6), 2, Some(Coord::new(1, 1)));
        assert!(zone.excludes(Coord::new(1, 1)));
        assert!(!zone.excludes(Coord::new(6, 6)));
        assert!(!zone.excludes(Coord::new(6, 7)));
    }

    #[test]
    fn test_first_floor_spawns_outside_entry_zone() {
        let rules = SpawnRules::from_config(&GenerationConfig::default());
        let library = TemplateLibrary::builtin().unwrap();
        let factory = LevelFactory::from_config(&GenerationConfig::default());

        for seed in 0..10 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let start = Coord::new(6, 6);
            let level = factory.build_level(0, start, &mut rng).unwrap();
            let monsters = rules.spawn_level(0, &level.board, start, None, &library, &mut rng).unwrap();

            assert!((3..=5).contains(&monsters.len()));
            for (i, monster) in monsters.iter().enumerate() {
                assert!(monster.position.chebyshev(&start) > 2);
                assert!(!level.board.is_blocked(monster.position));
                assert_ne!(Some(monster.position), level.board.stairs());
                assert!(monsters[i + 1..].iter().all(|other| other.position != monster.position));
            }
        }
    }

    #[test]
    fn test_previous_stairs_cell_stays_free() {
        let rules = SpawnRules {
            monsters: CountRange::new(140, 140),
            exclusion_radius: 2,
            max_attempts: 1000,
        };
        let library = TemplateLibrary::builtin().unwrap();
        let mut board = open_board();
        board.set_stairs(Coord::new(11, 11));
        let previous = Coord::new(3, 3);

        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let monsters = rules
            .spawn_level(1, &board, previous, Some(previous), &library, &mut rng)
            .unwrap();

        // 144 cells minus the previous stairs and this floor's stairs leaves 142
        assert_eq!(monsters.len(), 140);
        assert!(monsters.iter().all(|m| m.position != previous));
        assert!(monsters.iter().all(|m| m.position != Coord::new(11, 11)));
    }

    #[test]
    fn test_full_floor_reports_error() {
        let rules = SpawnRules {
            monsters: CountRange::new(5, 5),
            exclusion_radius: 2,
            max_attempts: 100,
        };
        let library = TemplateLibrary::builtin().unwrap();
        let (board, _) = Board::new_blocked(12, 12);
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        let err = rules
            .spawn_level(0, &board, Coord::new(6, 6), None, &library, &mut rng)
            .unwrap_err();
        assert!(matches!(err, GenerationError::Spawns { level: 0, .. }));
    }
}
