//! Submit Score Use Case

use chrono::{DateTime, Utc};
use puzzle::Difficulty;
use std::sync::Arc;

use crate::application::config::RankingConfig;
use crate::domain::entities::SoloSubmission;
use crate::domain::repository::{RankingRepository, RecordOutcome};
use crate::domain::value_objects::{SubmitMode, reporting_day};
use crate::error::{RankingError, RankingResult};

/// Input DTO for submit score, as received
#[derive(Debug, Clone, Default)]
pub struct SubmitScoreInput {
    pub device_id: String,
    pub player_id: String,
    pub country: String,
    pub score: f64,
    pub puzzle_id: String,
    pub difficulty: Option<String>,
    pub time_ms: Option<f64>,
    pub lang: Option<String>,
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Recorded,
    SkippedGroupMode,
    SkippedDuplicate,
}

impl SubmitOutcome {
    /// Reason reported to the client for an acknowledged but unrecorded submit
    pub fn skipped(&self) -> Option<&'static str> {
        match self {
            SubmitOutcome::Recorded => None,
            SubmitOutcome::SkippedGroupMode => Some("group_mode"),
            SubmitOutcome::SkippedDuplicate => Some("duplicate_puzzle"),
        }
    }
}

fn required(field: &str, value: &str) -> RankingResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RankingError::InvalidBody(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Submit Score Use Case
pub struct SubmitScoreUseCase<R: RankingRepository> {
    repo: Arc<R>,
    config: Arc<RankingConfig>,
}

impl<R: RankingRepository> SubmitScoreUseCase<R> {
    pub fn new(repo: Arc<R>, config: Arc<RankingConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: SubmitScoreInput) -> RankingResult<SubmitOutcome> {
        self.execute_at(input, Utc::now()).await
    }

    pub async fn execute_at(
        &self,
        input: SubmitScoreInput,
        now: DateTime<Utc>,
    ) -> RankingResult<SubmitOutcome> {
        let device_id = required("deviceId", &input.device_id)?;
        let player_id = required("playerId", &input.player_id)?;
        let country = required("country", &input.country)?;
        let puzzle_id = required("puzzleId", &input.puzzle_id)?;
        if !input.score.is_finite() {
            return Err(RankingError::InvalidBody("score must be a number".into()));
        }

        if SubmitMode::parse(input.mode.as_deref()) == SubmitMode::Group {
            tracing::debug!(puzzle_id = %puzzle_id, "Group-mode submission skipped");
            return Ok(SubmitOutcome::SkippedGroupMode);
        }

        let submission = SoloSubmission {
            device_id,
            puzzle_id,
            player_id,
            country,
            score: input.score.floor() as i64,
            difficulty: input
                .difficulty
                .as_deref()
                .and_then(|d| d.parse::<Difficulty>().ok()),
            time_ms: input
                .time_ms
                .filter(|t| t.is_finite())
                .map(|t| t.max(0.0).floor() as i64),
            lang: optional(input.lang.as_deref()),
            korea_date: reporting_day(now, self.config.day_offset),
            created_at: now,
        };

        match self.repo.record(&submission).await? {
            RecordOutcome::Recorded => {
                tracing::info!(
                    puzzle_id = %submission.puzzle_id,
                    score = submission.score,
                    korea_date = %submission.korea_date,
                    "Solo score recorded"
                );
                Ok(SubmitOutcome::Recorded)
            }
            RecordOutcome::Duplicate => {
                tracing::debug!(puzzle_id = %submission.puzzle_id, "Duplicate solo submission skipped");
                Ok(SubmitOutcome::SkippedDuplicate)
            }
        }
    }
}
