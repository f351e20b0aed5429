//! Puzzle crate property tests

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::generator::count_solutions;
use crate::{Difficulty, GeneratorOptions, PickPolicy, generate, pick, validate};

#[test]
fn test_generated_puzzles_validate_for_every_difficulty() {
    let mut rng = StdRng::seed_from_u64(2024);
    for difficulty in Difficulty::ALL {
        for _ in 0..1000 {
            let puzzle = generate(difficulty, GeneratorOptions::default(), &mut rng);
            assert!(validate(&puzzle), "invalid {difficulty} puzzle {:?}", puzzle.grid);
            assert!(puzzle.solution.is_solved());
            assert_eq!(puzzle.difficulty, difficulty);
        }
    }
}

#[test]
fn test_clue_count_hits_target() {
    let mut rng = StdRng::seed_from_u64(77);
    for difficulty in Difficulty::ALL {
        for _ in 0..200 {
            let puzzle = generate(difficulty, GeneratorOptions::default(), &mut rng);
            let clues = puzzle.grid.clue_count();
            if difficulty == Difficulty::Easy {
                assert!(clues >= difficulty.clue_target());
            } else {
                assert_eq!(clues, difficulty.clue_target());
            }
        }
    }
}

#[test]
fn test_unique_mode_has_one_solution() {
    let mut rng = StdRng::seed_from_u64(31);
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        for _ in 0..5 {
            let puzzle = generate(difficulty, GeneratorOptions::unique(), &mut rng);
            assert!(validate(&puzzle));
            assert!(puzzle.grid.clue_count() >= difficulty.clue_target());
            assert_eq!(count_solutions(&puzzle.grid, 2), 1);
        }
    }
}

#[test]
fn test_same_seed_same_puzzle() {
    let a = generate(
        Difficulty::Hard,
        GeneratorOptions::default(),
        &mut StdRng::seed_from_u64(42),
    );
    let b = generate(
        Difficulty::Hard,
        GeneratorOptions::default(),
        &mut StdRng::seed_from_u64(42),
    );
    assert_eq!(a.grid, b.grid);
    assert_eq!(a.solution, b.solution);
}

#[test]
fn test_pick_serializes_for_the_wire() {
    let mut rng = StdRng::seed_from_u64(8);
    let puzzle = pick(Difficulty::Insane, &[], &PickPolicy::default(), &mut rng);
    let json = serde_json::to_value(&puzzle).unwrap();
    assert_eq!(json["difficulty"], "insane");
    assert_eq!(json["grid"].as_str().map(str::len), Some(81));
    assert_eq!(json["solution"].as_str().map(str::len), Some(81));
}
