//! Error types for the isolation engine

use thiserror::Error;

use crate::board::Pos;

/// Main error type for the isolation engine.
///
/// The search deadline is not an error in this sense; it is signalled
/// through [`crate::search::SearchTimeout`] and never escapes the engine.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid board size {width}x{height} (each side must be 1..=255)")]
    InvalidBoardSize { width: usize, height: usize },

    #[error("position ({}, {}) is outside the {width}x{height} board", pos.row, pos.col)]
    OutOfBounds { pos: Pos, width: usize, height: usize },

    #[error("illegal move ({}, {}) for the player to move", pos.row, pos.col)]
    IllegalMove { pos: Pos },

    #[error("failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type alias for the isolation engine
pub type Result<T> = std::result::Result<T, Error>;
