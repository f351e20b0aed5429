//! Scoring Function
//!
//! Points for a finished game: a base per difficulty, a speed bonus, and one
//! point off for each assist option that was switched on.

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;

/// Points for solving at all
#[inline]
pub const fn base_points(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => 3,
        Difficulty::Medium => 5,
        Difficulty::Hard => 7,
        Difficulty::Pro => 10,
        Difficulty::Insane => 20,
    }
}

/// Points for finishing within [`bonus_limit_secs`]
#[inline]
pub const fn bonus_points(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => 3,
        Difficulty::Medium => 5,
        Difficulty::Hard => 7,
        Difficulty::Pro => 15,
        Difficulty::Insane => 20,
    }
}

/// Inclusive time limit for the bonus
#[inline]
pub const fn bonus_limit_secs(difficulty: Difficulty) -> u64 {
    match difficulty {
        Difficulty::Easy => 180,
        Difficulty::Medium => 300,
        Difficulty::Hard => 420,
        Difficulty::Pro => 900,
        Difficulty::Insane => 1200,
    }
}

/// Assist options that cost a point each
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Assists {
    pub highlight_same_numbers: bool,
    pub show_completed_numbers: bool,
}

impl Assists {
    pub fn new(highlight_same_numbers: bool, show_completed_numbers: bool) -> Self {
        Self {
            highlight_same_numbers,
            show_completed_numbers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: u32,
    pub bonus: u32,
    pub penalty: u32,
    pub total: u32,
    pub detail: Vec<String>,
}

pub fn score(difficulty: Difficulty, elapsed_secs: u64, assists: Assists) -> ScoreBreakdown {
    let base = base_points(difficulty);
    let bonus = if elapsed_secs <= bonus_limit_secs(difficulty) {
        bonus_points(difficulty)
    } else {
        0
    };

    let mut penalty = 0;
    let mut penalty_lines = Vec::new();
    if assists.highlight_same_numbers {
        penalty += 1;
        penalty_lines.push("same numbers: -1".to_string());
    }
    if assists.show_completed_numbers {
        penalty += 1;
        penalty_lines.push("completed digits: -1".to_string());
    }
    if penalty_lines.is_empty() {
        penalty_lines.push("Penalty: none".to_string());
    }

    let total = (base + bonus).saturating_sub(penalty);

    let mut detail = Vec::with_capacity(penalty_lines.len() + 3);
    detail.push(format!("Base: +{base}"));
    detail.push(format!("Bonus: +{bonus}"));
    detail.extend(penalty_lines);
    detail.push(format!("Total: {total}"));

    ScoreBreakdown {
        base,
        bonus,
        penalty,
        total,
        detail,
    }
}

/// Highest total reachable by a solve that took at least `elapsed_secs`
pub fn max_total(difficulty: Difficulty, elapsed_secs: u64, assists: Assists) -> u32 {
    score(difficulty, elapsed_secs, assists).total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easy_example() {
        let s = score(Difficulty::Easy, 100, Assists::new(true, false));
        assert_eq!((s.base, s.bonus, s.penalty, s.total), (3, 3, 1, 5));
        assert_eq!(
            s.detail,
            vec!["Base: +3", "Bonus: +3", "same numbers: -1", "Total: 5"]
        );
    }

    #[test]
    fn test_bonus_limit_is_inclusive() {
        assert_eq!(score(Difficulty::Medium, 300, Assists::default()).bonus, 5);
        assert_eq!(score(Difficulty::Medium, 301, Assists::default()).bonus, 0);
        assert_eq!(score(Difficulty::Insane, 1200, Assists::default()).total, 40);
    }

    #[test]
    fn test_no_penalty_line() {
        let s = score(Difficulty::Pro, 2000, Assists::default());
        assert_eq!(s.total, 10);
        assert!(s.detail.contains(&"Penalty: none".to_string()));
        assert!(s.detail.contains(&"Bonus: +0".to_string()));
    }

    #[test]
    fn test_both_assists() {
        let s = score(Difficulty::Hard, 10, Assists::new(true, true));
        assert_eq!(s.penalty, 2);
        assert_eq!(s.total, 12);
    }

    #[test]
    fn test_max_total_drops_after_limit() {
        let assists = Assists::new(false, true);
        assert_eq!(max_total(Difficulty::Easy, 0, assists), 5);
        assert_eq!(max_total(Difficulty::Easy, 181, assists), 2);
    }
}
