pub mod config;
pub mod monsters;
pub mod world;

pub use config::*;
pub use monsters::*;
pub use world::*;
