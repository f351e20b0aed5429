//! Domain Entities

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use puzzle::Difficulty;
use serde::Serialize;

/// One accepted solo result; `(device_id, puzzle_id)` is unique
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoloSubmission {
    pub device_id: String,
    pub puzzle_id: String,
    pub player_id: String,
    pub country: String,
    pub score: i64,
    pub difficulty: Option<Difficulty>,
    pub time_ms: Option<i64>,
    pub lang: Option<String>,
    pub korea_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl SoloSubmission {
    pub fn export_row(&self) -> ExportRow {
        ExportRow {
            player_id: self.player_id.clone(),
            score: self.score,
            time_ms: self.time_ms,
            difficulty: self.difficulty.map(|d| d.as_str().to_string()),
            korea_date: self.korea_date.format("%Y-%m-%d").to_string(),
            created_at: self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            country: self.country.clone(),
            lang: self.lang.clone(),
        }
    }
}

/// Accumulated score per device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerTotal {
    pub device_id: String,
    /// Latest display name and country reported by the device
    pub player_id: String,
    pub country: String,
    pub total_score: i64,
    pub submissions: i64,
    pub updated_at: DateTime<Utc>,
}

impl PlayerTotal {
    pub fn first(submission: &SoloSubmission) -> Self {
        Self {
            device_id: submission.device_id.clone(),
            player_id: submission.player_id.clone(),
            country: submission.country.clone(),
            total_score: submission.score,
            submissions: 1,
            updated_at: submission.created_at,
        }
    }

    pub fn absorb(&mut self, submission: &SoloSubmission) {
        self.player_id.clone_from(&submission.player_id);
        self.country.clone_from(&submission.country);
        self.total_score = self.total_score.saturating_add(submission.score);
        self.submissions += 1;
        self.updated_at = submission.created_at;
    }
}

/// One exported line, identical in CSV and JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub player_id: String,
    pub score: i64,
    pub time_ms: Option<i64>,
    pub difficulty: Option<String>,
    pub korea_date: String,
    pub created_at: String,
    pub country: String,
    pub lang: Option<String>,
}
