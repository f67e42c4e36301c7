use alloc::string::String;
use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board needs at least one row and one column")]
    InvalidDimensions,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Mine count must be between 1 and {max}")]
    InvalidMineCount { max: CellCount },
    #[error("Mines were already placed on this board")]
    MinesAlreadyPlaced,
    #[error("Layout has {actual} mines but the game expects {expected}")]
    MineCountMismatch {
        expected: CellCount,
        actual: CellCount,
    },
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Unknown difficulty {0:?}")]
    UnknownDifficulty(String),
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failure of a high-score backend. Never fatal to a game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Score store unavailable: {0}")]
    Unavailable(String),
    #[error("Malformed score entry for {key:?}")]
    Malformed { key: String },
}
