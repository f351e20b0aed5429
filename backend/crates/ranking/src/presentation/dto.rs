//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::get_rankings::RankedPlayer;
use crate::application::submit_score::SubmitScoreInput;

/// Request for POST /api/submit
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitScoreRequest {
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

impl From<SubmitScoreRequest> for SubmitScoreInput {
    fn from(req: SubmitScoreRequest) -> Self {
        Self {
            device_id: req.device_id,
            player_id: req.player_id,
            country: req.country,
            score: req.score,
            puzzle_id: req.puzzle_id,
            difficulty: req.difficulty,
            time_ms: req.time_ms,
            lang: req.lang,
            mode: req.mode,
        }
    }
}

/// Response for POST /api/submit
#[derive(Debug, Clone, Serialize)]
pub struct SubmitScoreResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<&'static str>,
}

/// Query for GET /api/export
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExportParams {
    pub scope: Option<String>,
    pub format: Option<String>,
    pub difficulty: Option<String>,
}

/// Response for GET /api/rankings
#[derive(Debug, Clone, Serialize)]
pub struct RankingsResponse {
    pub ok: bool,
    pub rows: Vec<RankedPlayer>,
}
