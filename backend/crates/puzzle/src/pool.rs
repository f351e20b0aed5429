//! Static puzzle pool and selection policy

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::board::{Puzzle, validate};
use crate::difficulty::Difficulty;
use crate::generator::{GeneratorOptions, generate};

/// Bundled, pre-validated puzzle
#[derive(Debug, Clone, Copy)]
pub struct PoolEntry {
    pub id: &'static str,
    pub difficulty: Difficulty,
    pub grid: &'static str,
    pub solution: &'static str,
}

impl PoolEntry {
    pub fn to_puzzle(&self) -> Option<Puzzle> {
        Some(Puzzle {
            id: self.id.to_string(),
            difficulty: self.difficulty,
            grid: self.grid.parse().ok()?,
            solution: self.solution.parse().ok()?,
        })
    }
}

pub static POOL: &[PoolEntry] = &[
    PoolEntry {
        id: "easy-1",
        difficulty: Difficulty::Easy,
        grid: "007354806456908300002706005700835000008260731069007050670090103090001074184573060",
        solution: "917354826456928317832716495721835649548269731369147258675492183293681574184573962",
    },
    PoolEntry {
        id: "easy-2",
        difficulty: Difficulty::Easy,
        grid: "084000716009700038372801054805270600407500002206180040040637120703000860601908470",
        solution: "584329716169745238372861954835274691417596382296183547948637125753412869621958473",
    },
    PoolEntry {
        id: "medium-1",
        difficulty: Difficulty::Medium,
        grid: "390001005070200801681000027740025903003000000000834670820000150400910700109570040",
        solution: "392781465574263891681459327748625913263197584915834672827346159456912738139578246",
    },
    PoolEntry {
        id: "medium-2",
        difficulty: Difficulty::Medium,
        grid: "600820470080915620005004090060108530803060002001000804328000001000402000900301256",
        solution: "619823475487915623235674198762148539843569712591237864328756941156492387974381256",
    },
    PoolEntry {
        id: "hard-1",
        difficulty: Difficulty::Hard,
        grid: "670500080300020706200640000060000021007400063008000000930000000746050090001092070",
        solution: "674513289315829746289647135463975821527481963198236457932764518746158392851392674",
    },
    PoolEntry {
        id: "hard-2",
        difficulty: Difficulty::Hard,
        grid: "509360070600002003000000018007800000300000890000000000104009037070540100035716200",
        solution: "519368472648172953723495618297854361351627894486931725164289537972543186835716249",
    },
    PoolEntry {
        id: "pro-1",
        difficulty: Difficulty::Pro,
        grid: "519000000006020300304000050050000700000090001902045000000230007000800000060957020",
        solution: "519483276786529314324671859451368792638792541972145683895234167247816935163957428",
    },
    PoolEntry {
        id: "pro-2",
        difficulty: Difficulty::Pro,
        grid: "000560700020007905000009400004900000300000502600740080000052000000600800003074006",
        solution: "941568723826437915735219468584923671379186542612745389468352197257691834193874256",
    },
    PoolEntry {
        id: "insane-1",
        difficulty: Difficulty::Insane,
        grid: "000000005300000800001500009510703400004000100000104200000400080425000001000000000",
        solution: "249368715356971824781542639512783496874629153693154278967415382425837961138296547",
    },
    PoolEntry {
        id: "insane-2",
        difficulty: Difficulty::Insane,
        grid: "500002000000000000000001000006074095009253400400600000600000143000000000804000070",
        solution: "591432687347568921268791354136874295789253416425619738672985143953147862814326579",
    },
];

/// How hard [`pick`] tries before falling back to the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickPolicy {
    pub attempts: usize,
    pub generator: GeneratorOptions,
}

impl Default for PickPolicy {
    fn default() -> Self {
        Self {
            attempts: 25,
            generator: GeneratorOptions::default(),
        }
    }
}

/// Choose a puzzle for a new game
///
/// Prefers a freshly generated puzzle that validates. After `attempts`
/// failures it draws from the pool for `difficulty`, skipping
/// `exclude_ids` when something else is left, and finally returns the
/// first pool entry.
pub fn pick<R: Rng + ?Sized>(
    difficulty: Difficulty,
    exclude_ids: &[String],
    policy: &PickPolicy,
    rng: &mut R,
) -> Puzzle {
    for _ in 0..policy.attempts {
        let puzzle = generate(difficulty, policy.generator, rng);
        if validate(&puzzle) && !exclude_ids.contains(&puzzle.id) {
            return puzzle;
        }
    }
    from_pool(difficulty, exclude_ids, rng)
        .or_else(|| POOL.first().and_then(PoolEntry::to_puzzle))
        .unwrap_or_else(|| generate(difficulty, policy.generator, rng))
}

fn from_pool<R: Rng + ?Sized>(
    difficulty: Difficulty,
    exclude_ids: &[String],
    rng: &mut R,
) -> Option<Puzzle> {
    let all: Vec<&PoolEntry> = POOL.iter().filter(|e| e.difficulty == difficulty).collect();
    let fresh: Vec<&PoolEntry> = all
        .iter()
        .copied()
        .filter(|e| !exclude_ids.iter().any(|id| id == e.id))
        .collect();
    let candidates = if fresh.is_empty() { all } else { fresh };

    candidates
        .choose(rng)
        .and_then(|entry| entry.to_puzzle())
        .filter(validate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pool_only() -> PickPolicy {
        PickPolicy {
            attempts: 0,
            ..PickPolicy::default()
        }
    }

    #[test]
    fn test_every_pool_entry_validates() {
        for entry in POOL {
            let puzzle = entry.to_puzzle().expect("pool entry parses");
            assert!(validate(&puzzle), "{} failed validation", entry.id);
            assert!(puzzle.solution.is_solved());
        }
    }

    #[test]
    fn test_pool_covers_every_difficulty() {
        for d in Difficulty::ALL {
            assert!(POOL.iter().any(|e| e.difficulty == d), "no pool entry for {d}");
        }
    }

    #[test]
    fn test_pick_prefers_generated() {
        let mut rng = StdRng::seed_from_u64(5);
        let puzzle = pick(Difficulty::Medium, &[], &PickPolicy::default(), &mut rng);
        assert!(puzzle.id.starts_with("gen-medium-"));
        assert!(validate(&puzzle));
    }

    #[test]
    fn test_pool_fallback_respects_exclusions() {
        let mut rng = StdRng::seed_from_u64(9);
        let exclude = vec!["hard-1".to_string()];
        for _ in 0..20 {
            let puzzle = pick(Difficulty::Hard, &exclude, &pool_only(), &mut rng);
            assert_eq!(puzzle.id, "hard-2");
        }
    }

    #[test]
    fn test_pool_fallback_degrades_when_all_excluded() {
        let mut rng = StdRng::seed_from_u64(9);
        let exclude = vec!["pro-1".to_string(), "pro-2".to_string()];
        let puzzle = pick(Difficulty::Pro, &exclude, &pool_only(), &mut rng);
        assert_eq!(puzzle.difficulty, Difficulty::Pro);
        assert!(validate(&puzzle));
    }
}
