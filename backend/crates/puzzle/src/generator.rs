//! Puzzle Generator
//!
//! Builds a solved grid by randomized backtracking, then carves clues away
//! until the difficulty's clue target is reached.

use rand::Rng;
use rand::seq::SliceRandom;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::board::{Board, CELLS, Puzzle, SIZE, box_of, col_of, row_of};
use crate::difficulty::Difficulty;

/// Easy puzzles keep at least this many givens per row and column
pub const EASY_LINE_FLOOR: usize = 4;

/// Carving options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Only clear a cell when the puzzle keeps exactly one solution.
    /// May stop above the clue target.
    pub unique: bool,
}

impl GeneratorOptions {
    pub fn unique() -> Self {
        Self { unique: true }
    }
}

/// Generate a fresh puzzle for `difficulty`
///
/// Callers must still run [`crate::validate`] before handing it out.
pub fn generate<R: Rng + ?Sized>(
    difficulty: Difficulty,
    options: GeneratorOptions,
    rng: &mut R,
) -> Puzzle {
    let solution = full_grid(rng);
    let grid = carve(&solution, difficulty, options, rng);
    Puzzle {
        id: generated_id(difficulty, rng),
        difficulty,
        grid,
        solution,
    }
}

/// `gen-<difficulty>-<millis>-<random hex>`
fn generated_id<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("gen-{difficulty}-{millis}-{:08x}", rng.random::<u32>())
}

/// Randomized constructive search: shuffled first row, then row-major
/// backtracking with a shuffled candidate order per cell
pub fn full_grid<R: Rng + ?Sized>(rng: &mut R) -> Board {
    let mut board = Board::EMPTY;
    let mut first_row: [u8; SIZE] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
    first_row.shuffle(rng);
    for (c, &v) in first_row.iter().enumerate() {
        board.set(c, v);
    }
    fill(&mut board, SIZE, rng);
    board
}

fn fill<R: Rng + ?Sized>(board: &mut Board, idx: usize, rng: &mut R) -> bool {
    if idx == CELLS {
        return true;
    }
    let mut candidates: [u8; SIZE] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
    candidates.shuffle(rng);
    for n in candidates {
        if board.can_place(idx, n) {
            board.set(idx, n);
            if fill(board, idx + 1, rng) {
                return true;
            }
            board.set(idx, 0);
        }
    }
    false
}

fn carve<R: Rng + ?Sized>(
    solution: &Board,
    difficulty: Difficulty,
    options: GeneratorOptions,
    rng: &mut R,
) -> Board {
    let target = difficulty.clue_target();
    let mut grid = *solution;
    let mut clues = CELLS;

    let mut positions: Vec<usize> = (0..CELLS).collect();
    positions.shuffle(rng);

    for pos in positions {
        if clues <= target {
            break;
        }
        let backup = grid.get(pos);
        grid.set(pos, 0);

        if difficulty == Difficulty::Easy {
            let (r, c) = (row_of(pos), col_of(pos));
            let row_clues = (0..SIZE).filter(|&k| grid.get(r * SIZE + k) != 0).count();
            let col_clues = (0..SIZE).filter(|&k| grid.get(k * SIZE + c) != 0).count();
            if row_clues < EASY_LINE_FLOOR || col_clues < EASY_LINE_FLOOR {
                grid.set(pos, backup);
                continue;
            }
        }

        if options.unique && count_solutions(&grid, 2) != 1 {
            grid.set(pos, backup);
            continue;
        }

        clues -= 1;
    }
    grid
}

/// Count completions of `board`, stopping once `limit` is reached
///
/// Picks the most constrained empty cell first, so sparse grids stay cheap.
pub fn count_solutions(board: &Board, limit: usize) -> usize {
    if !board.givens_consistent() {
        return 0;
    }
    let mut rows = [0u16; SIZE];
    let mut cols = [0u16; SIZE];
    let mut boxes = [0u16; SIZE];
    let mut cells = *board.cells();
    for (idx, &v) in cells.iter().enumerate() {
        if v != 0 {
            let bit = 1u16 << v;
            rows[row_of(idx)] |= bit;
            cols[col_of(idx)] |= bit;
            boxes[box_of(idx)] |= bit;
        }
    }
    let mut masks = Masks { rows, cols, boxes };
    let mut found = 0;
    search(&mut cells, &mut masks, limit, &mut found);
    found
}

struct Masks {
    rows: [u16; SIZE],
    cols: [u16; SIZE],
    boxes: [u16; SIZE],
}

impl Masks {
    const ALL: u16 = 0b11_1111_1110;

    fn candidates(&self, idx: usize) -> u16 {
        let used = self.rows[row_of(idx)] | self.cols[col_of(idx)] | self.boxes[box_of(idx)];
        Self::ALL & !used
    }

    fn toggle(&mut self, idx: usize, v: u8) {
        let bit = 1u16 << v;
        self.rows[row_of(idx)] ^= bit;
        self.cols[col_of(idx)] ^= bit;
        self.boxes[box_of(idx)] ^= bit;
    }
}

fn search(cells: &mut [u8; CELLS], masks: &mut Masks, limit: usize, found: &mut usize) {
    let mut best: Option<(usize, u16)> = None;
    for idx in 0..CELLS {
        if cells[idx] != 0 {
            continue;
        }
        let cand = masks.candidates(idx);
        if cand == 0 {
            return;
        }
        if best.is_none_or(|(_, b)| cand.count_ones() < b.count_ones()) {
            best = Some((idx, cand));
        }
    }

    let Some((idx, cand)) = best else {
        *found += 1;
        return;
    };

    for v in 1..=9u8 {
        if cand & (1 << v) == 0 {
            continue;
        }
        cells[idx] = v;
        masks.toggle(idx, v);
        search(cells, masks, limit, found);
        masks.toggle(idx, v);
        cells[idx] = 0;
        if *found >= limit {
            return;
        }
    }
}
