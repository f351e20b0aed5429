//! Puzzle Crate - Sudoku engine and scoring
//!
//! Pure domain logic with no I/O:
//! - [`board`]: 9x9 board value object, conflict and completion checks
//! - [`generator`]: randomized full-grid construction and carving
//! - [`pool`]: pre-validated fallback puzzles and the selection policy
//! - [`scoring`]: point breakdown for a finished game
//!
//! Randomness is always injected (`rand::Rng`), so callers decide between
//! the thread RNG in production and a seeded `StdRng` in tests.

pub mod board;
pub mod difficulty;
pub mod error;
pub mod generator;
pub mod pool;
pub mod scoring;

pub use board::{Board, Puzzle, validate};
pub use difficulty::Difficulty;
pub use error::PuzzleError;
pub use generator::{GeneratorOptions, generate};
pub use pool::{PickPolicy, pick};
pub use scoring::{Assists, ScoreBreakdown, max_total, score};

#[cfg(test)]
mod tests;
