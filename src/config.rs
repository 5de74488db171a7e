use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use rand::Rng;
use crate::world::{ConfigError, DrunkardsWalk, QuadrantBalance, MAP_SIZE_X, MAP_SIZE_Y, NO_OF_LEVELS};

/// Seeds drawn for a fresh run lie below this bound, so they stay short
/// enough to read off the screen and type back in.
pub const MAX_RANDOM_SEED: u64 = 1_000_000;

pub fn random_seed() -> u64 {
    rand::thread_rng().gen_range(0..MAX_RANDOM_SEED)
}

/// Parses a seed typed by the player. Anything unparsable is reported and
/// replaced by a fresh random seed.
pub fn seed_from_str(text: &str) -> u64 {
    match text.trim().parse::<u64>() {
        Ok(seed) => seed,
        Err(e) => {
            let seed = random_seed();
            eprintln!("Could not read seed {:?} ({}), using {} instead", text, e, seed);
            seed
        }
    }
}

/// Inclusive range of how many things to place on one floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(self.min..=self.max) as usize
    }
}

/// Parameters for a whole run. Read once at startup; every floor of the run
/// shares the same dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub width: i32,
    pub height: i32,
    pub level_count: usize,
    pub dig_min_percent: u32,
    pub dig_max_percent: u32,
    pub balance_tolerance: f64,
    pub resources: CountRange,
    pub monsters: CountRange,
    /// Half-width of the square around the first floor's start kept free of monsters
    pub spawn_exclusion_radius: i32,
    pub max_layout_attempts: usize,
    pub max_placement_attempts: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: MAP_SIZE_X,
            height: MAP_SIZE_Y,
            level_count: NO_OF_LEVELS,
            dig_min_percent: 60,
            dig_max_percent: 85,
            balance_tolerance: 0.20,
            resources: CountRange::new(3, 6),
            monsters: CountRange::new(3, 5),
            spawn_exclusion_radius: 2,
            max_layout_attempts: 10_000,
            max_placement_attempts: 1000,
        }
    }
}

impl GenerationConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: GenerationConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Rejects settings the generators cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.level_count == 0 {
            return Err(ConfigError::NoLevels);
        }
        if self.dig_min_percent > 100 || self.dig_max_percent > 100 {
            return Err(ConfigError::InvalidDigPercent {
                min: self.dig_min_percent,
                max: self.dig_max_percent,
            });
        }
        if self.dig_min_percent > self.dig_max_percent {
            return Err(ConfigError::InvertedRange {
                name: "dig percent",
                min: self.dig_min_percent,
                max: self.dig_max_percent,
            });
        }
        if !self.balance_tolerance.is_finite() || self.balance_tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.balance_tolerance));
        }
        for (name, range) in [("resource count", self.resources), ("monster count", self.monsters)] {
            if range.min > range.max {
                return Err(ConfigError::InvertedRange {
                    name,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        if self.max_layout_attempts == 0 {
            return Err(ConfigError::ZeroAttempts("max_layout_attempts"));
        }
        if self.max_placement_attempts == 0 {
            return Err(ConfigError::ZeroAttempts("max_placement_attempts"));
        }
        Ok(())
    }

    pub fn walker(&self) -> DrunkardsWalk {
        DrunkardsWalk::new(self.dig_min_percent, self.dig_max_percent)
    }

    pub fn balance(&self) -> QuadrantBalance {
        QuadrantBalance::new(self.balance_tolerance)
    }
}
