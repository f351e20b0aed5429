//! Board and Puzzle value objects
//!
//! A board is 81 cells in row-major order; `0` marks an empty cell.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::difficulty::Difficulty;
use crate::error::PuzzleError;

pub const SIZE: usize = 9;
pub const CELLS: usize = SIZE * SIZE;

#[inline]
pub const fn row_of(idx: usize) -> usize {
    idx / SIZE
}

#[inline]
pub const fn col_of(idx: usize) -> usize {
    idx % SIZE
}

#[inline]
pub const fn box_of(idx: usize) -> usize {
    (row_of(idx) / 3) * 3 + col_of(idx) / 3
}

/// Whether two distinct cells share a row, column or box
#[inline]
pub const fn are_peers(a: usize, b: usize) -> bool {
    a != b && (row_of(a) == row_of(b) || col_of(a) == col_of(b) || box_of(a) == box_of(b))
}

/// 9x9 board, serialized as an 81-character digit string
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board([u8; CELLS]);

impl Board {
    pub const EMPTY: Board = Board([0; CELLS]);

    pub fn from_cells(cells: [u8; CELLS]) -> Self {
        Self(cells)
    }

    #[inline]
    pub fn cells(&self) -> &[u8; CELLS] {
        &self.0
    }

    #[inline]
    pub fn get(&self, idx: usize) -> u8 {
        self.0[idx]
    }

    #[inline]
    pub fn set(&mut self, idx: usize, value: u8) {
        self.0[idx] = value;
    }

    /// Number of non-empty cells
    pub fn clue_count(&self) -> usize {
        self.0.iter().filter(|&&v| v != 0).count()
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(|&v| v != 0)
    }

    /// Whether `value` may go at `idx` without clashing with a peer
    pub fn can_place(&self, idx: usize, value: u8) -> bool {
        (0..CELLS).all(|other| !are_peers(idx, other) || self.0[other] != value)
    }

    /// A cell conflicts if a peer holds the same nonzero value
    pub fn conflicts(&self, idx: usize) -> bool {
        let v = self.0[idx];
        v != 0 && !self.can_place(idx, v)
    }

    pub fn any_conflict(&self) -> bool {
        (0..CELLS).any(|idx| self.conflicts(idx))
    }

    /// All cells filled and none conflicting
    pub fn is_solved(&self) -> bool {
        self.is_full() && !self.any_conflict()
    }

    /// Indexes holding `n` (for "highlight same numbers")
    pub fn same_number_indexes(&self, n: u8) -> Vec<usize> {
        if n == 0 {
            return Vec::new();
        }
        (0..CELLS).filter(|&idx| self.0[idx] == n).collect()
    }

    /// Occurrences of `n` (for "show completed numbers": complete at 9)
    pub fn count_number(&self, n: u8) -> usize {
        self.0.iter().filter(|&&v| v == n).count()
    }

    /// Digits already placed nine times
    pub fn completed_numbers(&self) -> Vec<u8> {
        (1..=9).filter(|&n| self.count_number(n) == SIZE).collect()
    }

    /// No duplicate givens in any row, column or box
    pub fn givens_consistent(&self) -> bool {
        let mut rows = [0u16; SIZE];
        let mut cols = [0u16; SIZE];
        let mut boxes = [0u16; SIZE];
        for (idx, &v) in self.0.iter().enumerate() {
            if v == 0 {
                continue;
            }
            if v > 9 {
                return false;
            }
            let bit = 1u16 << v;
            let (r, c, b) = (row_of(idx), col_of(idx), box_of(idx));
            if rows[r] & bit != 0 || cols[c] & bit != 0 || boxes[b] & bit != 0 {
                return false;
            }
            rows[r] |= bit;
            cols[c] |= bit;
            boxes[b] |= bit;
        }
        true
    }

    /// Every cell in 1..=9 and every unit a permutation
    pub fn is_valid_solution(&self) -> bool {
        self.is_full() && self.givens_consistent()
    }

    /// Each given equals the corresponding cell of `solution`
    pub fn agrees_with(&self, solution: &Board) -> bool {
        self.0
            .iter()
            .zip(solution.0.iter())
            .all(|(&g, &s)| g == 0 || g == s)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl FromStr for Board {
    type Err = PuzzleError;

    /// Accepts digits, with `.` as an alias for an empty cell
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != CELLS {
            return Err(PuzzleError::BadLength(len));
        }
        let mut cells = [0u8; CELLS];
        for (index, symbol) in s.chars().enumerate() {
            cells[index] = match symbol {
                '.' => 0,
                '0'..='9' => symbol as u8 - b'0',
                _ => return Err(PuzzleError::BadSymbol { index, symbol }),
            };
        }
        Ok(Self(cells))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &v in &self.0 {
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({self})")
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A playable puzzle with its reference solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub id: String,
    pub difficulty: Difficulty,
    pub grid: Board,
    pub solution: Board,
}

impl Puzzle {
    pub fn validate(&self) -> bool {
        validate(self)
    }
}

/// Accept-or-reject check run on every puzzle before it is handed out
///
/// Board length is enforced by the type, so this covers duplicate givens,
/// solution validity and per-cell agreement.
pub fn validate(puzzle: &Puzzle) -> bool {
    puzzle.grid.givens_consistent()
        && puzzle.solution.is_valid_solution()
        && puzzle.grid.agrees_with(&puzzle.solution)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVED: &str =
        "917354826456928317832716495721835649548269731369147258675492183293681574184573962";

    #[test]
    fn test_parse_and_display() {
        let board: Board = SOLVED.parse().unwrap();
        assert_eq!(board.to_string(), SOLVED);
        assert_eq!(board.get(0), 9);
        assert_eq!(board.get(80), 2);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("123".parse::<Board>(), Err(PuzzleError::BadLength(3)));
        let bad = format!("x{}", &SOLVED[1..]);
        assert_eq!(
            bad.parse::<Board>(),
            Err(PuzzleError::BadSymbol {
                index: 0,
                symbol: 'x'
            })
        );
    }

    #[test]
    fn test_dot_is_empty() {
        let dotted = format!(".{}", &SOLVED[1..]);
        let board: Board = dotted.parse().unwrap();
        assert_eq!(board.get(0), 0);
        assert_eq!(board.clue_count(), 80);
    }

    #[test]
    fn test_solved_board() {
        let board: Board = SOLVED.parse().unwrap();
        assert!(board.is_solved());
        assert!(board.is_valid_solution());
        assert_eq!(board.completed_numbers(), (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn test_conflicts_row_col_box() {
        let mut board = Board::EMPTY;
        board.set(0, 5);
        board.set(8, 5);
        assert!(board.conflicts(0));
        assert!(board.conflicts(8));

        let mut board = Board::EMPTY;
        board.set(0, 5);
        board.set(72, 5);
        assert!(board.conflicts(72));

        let mut board = Board::EMPTY;
        board.set(0, 5);
        board.set(20, 5);
        assert!(board.conflicts(20));

        let mut board = Board::EMPTY;
        board.set(0, 5);
        board.set(40, 5);
        assert!(!board.any_conflict());
        assert!(!board.conflicts(1));
    }

    #[test]
    fn test_unsolved_when_incomplete_or_conflicting() {
        let mut board: Board = SOLVED.parse().unwrap();
        board.set(10, 0);
        assert!(!board.is_solved());

        let mut board: Board = SOLVED.parse().unwrap();
        let (a, b) = (board.get(0), board.get(1));
        board.set(0, b);
        board.set(1, a);
        assert!(board.is_full());
        assert!(!board.is_solved());
    }

    #[test]
    fn test_same_number_and_count() {
        let board: Board = SOLVED.parse().unwrap();
        let sevens = board.same_number_indexes(7);
        assert_eq!(sevens.len(), 9);
        assert!(sevens.iter().all(|&i| board.get(i) == 7));
        assert!(board.same_number_indexes(0).is_empty());
        assert_eq!(board.count_number(3), 9);
    }

    #[test]
    fn test_validate_rejects_disagreement() {
        let solution: Board = SOLVED.parse().unwrap();
        let mut grid = Board::EMPTY;
        grid.set(0, 1);
        let puzzle = Puzzle {
            id: "t".into(),
            difficulty: Difficulty::Easy,
            grid,
            solution,
        };
        assert!(!validate(&puzzle));

        let mut grid = Board::EMPTY;
        grid.set(0, 9);
        assert!(validate(&Puzzle { grid, ..puzzle }));
    }

    #[test]
    fn test_serde_as_string() {
        let board: Board = SOLVED.parse().unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, format!("\"{SOLVED}\""));
        assert!(serde_json::from_str::<Board>("\"12\"").is_err());
    }
}
