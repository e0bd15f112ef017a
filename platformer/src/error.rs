//! Error types surfaced at construction time.
//!
//! A running tick has no error path; everything here is reported before the
//! first tick, while configuration and level fixtures are checked.

use thiserror::Error;

/// Problems with a [`SimConfig`](crate::engine::SimConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Problems found while validating a [`LevelCatalog`](crate::levels::LevelCatalog).
#[derive(Debug, Error, PartialEq)]
pub enum LevelError {
    #[error("level catalog is empty")]
    EmptyCatalog,

    #[error("level {level} has no coins")]
    NoCoins { level: u32 },

    #[error("level {level} platform {index} has a non-positive size ({width}x{height})")]
    InvalidPlatform {
        level: u32,
        index: usize,
        width: f32,
        height: f32,
    },

    #[error("direction must be -1 or 1, got {0}")]
    InvalidDirection(i8),
}

/// Returned by [`LevelCatalog::lookup`](crate::levels::LevelCatalog::lookup)
/// past the last defined level. The game flow treats it as "all levels
/// finished".
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("level {0} is not defined")]
pub struct LevelNotFound(pub u32);

/// Anything that stops a [`Game`](crate::game::Game) from starting.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Level(#[from] LevelError),
}
