use serde::{Deserialize, Serialize};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use crate::config::GenerationConfig;
use crate::monsters::{CreatureLoader, Monster, SpawnExclusion, SpawnRules};
use super::{Coord, GenerationError, LayoutValidator, Level, LevelFactory};

/// A complete run: every floor in descent order plus the monsters waiting on each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonLayout {
    pub seed: u64,
    pub levels: Vec<Level>,
    pub creatures: Vec<Vec<Monster>>,
}

impl DungeonLayout {
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn level_mut(&mut self, index: usize) -> Option<&mut Level> {
        self.levels.get_mut(index)
    }

    pub fn spawns(&self, index: usize) -> &[Monster] {
        self.creatures.get(index).map(|c| c.as_slice()).unwrap_or(&[])
    }

    /// Checks the structural guarantees of a generated run and describes
    /// every violation found. An empty list means the layout is sound.
    pub fn check_invariants(&self, config: &GenerationConfig) -> Vec<String> {
        let mut problems = Vec::new();
        let balance = config.balance();

        if self.levels.len() != self.creatures.len() {
            problems.push(format!(
                "{} levels but {} spawn lists",
                self.levels.len(),
                self.creatures.len()
            ));
        }

        for (i, level) in self.levels.iter().enumerate() {
            let board = &level.board;
            let stairs: Vec<Coord> = board.tiles().filter(|t| t.is_stairs()).map(|t| t.position).collect();
            if stairs.len() != 1 || board.stairs() != stairs.first().copied() {
                problems.push(format!("level {}: expected one stairs tile, found {}", i, stairs.len()));
            }
            if board.is_blocked(level.stairs()) {
                problems.push(format!("level {}: stairs at {} are blocked", i, level.stairs()));
            }
            if !balance.is_valid(board) {
                problems.push(format!("level {}: quadrants out of balance {:?}", i, balance.report(board).counts));
            }

            let expected_start = if i == 0 {
                board.center()
            } else {
                self.levels[i - 1].stairs()
            };
            if level.start != expected_start {
                problems.push(format!(
                    "level {}: starts at {} instead of {}",
                    i, level.start, expected_start
                ));
            }

            for coord in board.resource_positions() {
                if coord == level.start || coord == level.stairs() || board.is_blocked(coord) {
                    problems.push(format!("level {}: resource misplaced at {}", i, coord));
                }
            }

            let previous_stairs = if i > 0 { Some(self.levels[i - 1].stairs()) } else { None };
            let exclusion =
                SpawnExclusion::for_level(i, level.start, config.spawn_exclusion_radius, previous_stairs);
            let monsters = self.spawns(i);
            for (j, monster) in monsters.iter().enumerate() {
                let position = monster.position;
                if board.is_blocked(position) || exclusion.excludes(position) || position == level.stairs() {
                    problems.push(format!("level {}: monster misplaced at {}", i, position));
                }
                if monsters[j + 1..].iter().any(|other| other.position == position) {
                    problems.push(format!("level {}: two monsters share {}", i, position));
                }
            }
        }

        problems
    }
}

/// Chains floors together: each floor is carved from the stairs of the one above.
pub struct DungeonGenerator<V: LayoutValidator = super::QuadrantBalance> {
    pub config: GenerationConfig,
    factory: LevelFactory<V>,
    spawn_rules: SpawnRules,
}

impl DungeonGenerator {
    pub fn new(config: GenerationConfig) -> Result<Self, GenerationError> {
        config.validate()?;
        let factory = LevelFactory::from_config(&config);
        let spawn_rules = SpawnRules::from_config(&config);
        Ok(Self {
            config,
            factory,
            spawn_rules,
        })
    }
}

impl<V: LayoutValidator> DungeonGenerator<V> {
    pub fn with_validator(config: GenerationConfig, validator: V) -> Result<Self, GenerationError> {
        config.validate()?;
        let factory = LevelFactory::with_validator(&config, validator);
        let spawn_rules = SpawnRules::from_config(&config);
        Ok(Self {
            config,
            factory,
            spawn_rules,
        })
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.factory.verbose = verbose;
        self
    }

    /// Builds the whole dungeon from a seed. The same seed, configuration and
    /// templates always give the same layout.
    pub fn generate_dungeon<L: CreatureLoader>(&self, seed: u64, loader: &L) -> Result<DungeonLayout, GenerationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let levels = self.build_levels(&mut rng)?;
        let creatures = self.populate(&levels, loader, &mut rng)?;

        Ok(DungeonLayout {
            seed,
            levels,
            creatures,
        })
    }

    /// Builds every floor in order, entering each one where the previous
    /// floor's stairs lie.
    pub fn build_levels<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Level>, GenerationError> {
        let mut levels: Vec<Level> = Vec::with_capacity(self.config.level_count);
        let mut start = Coord::new(self.config.width / 2, self.config.height / 2);

        for number in 0..self.config.level_count {
            let level = self.factory.build_level(number, start, rng)?;
            start = level.stairs();
            levels.push(level);
        }

        Ok(levels)
    }

    /// Spawns monsters on every finished floor.
    pub fn populate<L, R>(&self, levels: &[Level], loader: &L, rng: &mut R) -> Result<Vec<Vec<Monster>>, GenerationError>
    where
        L: CreatureLoader,
        R: Rng + ?Sized,
    {
        let mut creatures = Vec::with_capacity(levels.len());
        let mut previous_stairs = None;

        for level in levels {
            let monsters = self.spawn_rules.spawn_level(
                level.number,
                &level.board,
                level.start,
                previous_stairs,
                loader,
                rng,
            )?;
            creatures.push(monsters);
            previous_stairs = Some(level.stairs());
        }

        Ok(creatures)
    }
}
