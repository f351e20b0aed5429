//! Difficulty Value Object

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PuzzleError;

/// Puzzle difficulty tier
///
/// Serialized in lower case (`"easy"`, `"insane"`), which is also the form
/// stored in room state and solo submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    #[display("easy")]
    Easy,
    #[display("medium")]
    Medium,
    #[display("hard")]
    Hard,
    #[display("pro")]
    Pro,
    #[display("insane")]
    Insane,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Pro,
        Difficulty::Insane,
    ];

    /// Number of givens the carver aims for
    #[inline]
    pub const fn clue_target(&self) -> usize {
        match self {
            Self::Easy => 46,
            Self::Medium => 38,
            Self::Hard => 30,
            Self::Pro => 26,
            Self::Insane => 22,
        }
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Pro => "pro",
            Self::Insane => "insane",
        }
    }
}

impl FromStr for Difficulty {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| PuzzleError::UnknownDifficulty(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" Insane ".parse::<Difficulty>().unwrap(), Difficulty::Insane);
        assert!(matches!(
            "nightmare".parse::<Difficulty>(),
            Err(PuzzleError::UnknownDifficulty(_))
        ));
    }

    #[test]
    fn test_display_matches_serde() {
        for d in Difficulty::ALL {
            let json = serde_json::to_string(&d).unwrap();
            assert_eq!(json, format!("\"{d}\""));
        }
    }

    #[test]
    fn test_clue_targets_decrease() {
        let targets: Vec<_> = Difficulty::ALL.iter().map(|d| d.clue_target()).collect();
        assert_eq!(targets, vec![46, 38, 30, 26, 22]);
    }
}
