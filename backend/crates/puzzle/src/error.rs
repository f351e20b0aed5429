//! Puzzle Error Types

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("Board must have exactly 81 cells, got {0}")]
    BadLength(usize),

    #[error("Invalid cell symbol {symbol:?} at index {index}")]
    BadSymbol { index: usize, symbol: char },

    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),
}
