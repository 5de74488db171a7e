//! Error and warning types shared by the generators.

use thiserror::Error;

use super::Coord;

/// Sanity checks on generator-controlled construction values.
///
/// These are reported, never fatal: the tile or monster is still built with
/// the offending value and handed back alongside the warnings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstructionWarning {
    #[error("layer is smaller than 0 <layer: {layer}>")]
    NegativeLayer { layer: i32 },

    #[error("layer is not equal to the expected layer <layer: {layer}; expected: {expected}>")]
    UnexpectedLayer { layer: i32, expected: i32 },

    #[error("coords out of map range <x: {x}; y: {y}; map width: {width}; map height: {height}>")]
    OutOfBounds { x: i32, y: i32, width: i32, height: i32 },

    #[error("glyph length is not equal to 1 <length: {length}; glyph: {glyph:?}>")]
    GlyphLength { glyph: String, length: usize },

    #[error("{stat} is smaller than 0 <{stat}: {value}>")]
    NegativeStat { stat: &'static str, value: i32 },
}

/// Misconfiguration detected before any generation starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("map dimensions must be positive <width: {width}; height: {height}>")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("level count must be at least 1")]
    NoLevels,

    #[error("{name} range is inverted <min: {min}; max: {max}>")]
    InvertedRange { name: &'static str, min: u32, max: u32 },

    #[error("dig percentages must lie in 0..=100 <min: {min}; max: {max}>")]
    InvalidDigPercent { min: u32, max: u32 },

    #[error("balance tolerance must be a finite, non-negative fraction <tolerance: {0}>")]
    InvalidTolerance(f64),

    #[error("{0} must allow at least one attempt")]
    ZeroAttempts(&'static str),
}

/// Placement of non-overlapping positions could not be satisfied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacementError {
    #[error("not enough free cells <requested: {requested}; placed: {placed}>")]
    NotEnoughSpace { requested: usize, placed: usize },
}

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("start point {start} lies outside the map")]
    StartOutOfBounds { start: Coord },

    #[error("could not place resources on level {level}: {source}")]
    Resources { level: usize, source: PlacementError },

    #[error("could not place monsters on level {level}: {source}")]
    Spawns { level: usize, source: PlacementError },

    #[error("could not build monster: {0}")]
    Loader(#[from] crate::monsters::LoaderError),
}
