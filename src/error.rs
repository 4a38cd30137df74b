//! Error taxonomy
//!
//! Every error here is local and recoverable: the state machine turns level
//! errors into a refusal to start the level, never into a crash.

use thiserror::Error;

/// Tile grid construction errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions {width}x{height} out of range (1 to {max} cells)", max = crate::consts::MAX_GRID_CELLS)]
    InvalidDimensions { width: usize, height: usize },
}

/// Level lookup and loading errors
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level {index} does not exist (pack has {count} levels)")]
    InvalidLevel { index: usize, count: usize },
    #[error("level pack contains no levels")]
    EmptyPack,
    #[error("malformed level map: {0}")]
    Grid(#[from] GridError),
    #[error("level pack parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("could not read level pack: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings validation and loading errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("setting `{field}` {reason}")]
    Invalid { field: &'static str, reason: &'static str },
    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("could not access settings file: {0}")]
    Io(#[from] std::io::Error),
}
