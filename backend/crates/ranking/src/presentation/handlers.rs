//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use puzzle::Difficulty;
use std::sync::Arc;

use crate::application::config::RankingConfig;
use crate::application::export_rankings::{ExportInput, ExportRankingsUseCase};
use crate::application::get_rankings::GetRankingsUseCase;
use crate::application::submit_score::SubmitScoreUseCase;
use crate::domain::repository::RankingRepository;
use crate::domain::value_objects::{ExportFormat, ExportScope};
use crate::error::RankingResult;
use crate::presentation::dto::{
    ExportParams, RankingsResponse, SubmitScoreRequest, SubmitScoreResponse,
};

/// Shared state for ranking handlers
pub struct RankingAppState<R> {
    pub repo: Arc<R>,
    pub config: Arc<RankingConfig>,
}

impl<R> Clone for RankingAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

/// POST /api/submit
pub async fn submit_score<R>(
    State(state): State<RankingAppState<R>>,
    body: Result<Json<SubmitScoreRequest>, JsonRejection>,
) -> RankingResult<Json<SubmitScoreResponse>>
where
    R: RankingRepository + Send + Sync + 'static,
{
    let Json(req) = body?;
    let outcome = SubmitScoreUseCase::new(state.repo.clone(), state.config.clone())
        .execute(req.into())
        .await?;

    Ok(Json(SubmitScoreResponse {
        ok: true,
        skipped: outcome.skipped(),
    }))
}

/// GET /api/export
pub async fn export_rankings<R>(
    State(state): State<RankingAppState<R>>,
    Query(params): Query<ExportParams>,
) -> RankingResult<impl IntoResponse>
where
    R: RankingRepository + Send + Sync + 'static,
{
    let input = ExportInput {
        scope: params
            .scope
            .as_deref()
            .map(str::parse::<ExportScope>)
            .transpose()?
            .unwrap_or_default(),
        format: params
            .format
            .as_deref()
            .map(str::parse::<ExportFormat>)
            .transpose()?
            .unwrap_or_default(),
        difficulty: params
            .difficulty
            .as_deref()
            .and_then(|d| d.parse::<Difficulty>().ok()),
    };

    let output = ExportRankingsUseCase::new(state.repo.clone(), state.config.clone())
        .execute(input)
        .await?;
    let body = output.render()?;
    let disposition = format!("attachment; filename=\"{}\"", output.file_name());

    Ok((
        [
            (header::CONTENT_TYPE, output.format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// GET /api/rankings
pub async fn get_rankings<R>(
    State(state): State<RankingAppState<R>>,
) -> RankingResult<Json<RankingsResponse>>
where
    R: RankingRepository + Send + Sync + 'static,
{
    let rows = GetRankingsUseCase::new(state.repo.clone(), state.config.clone())
        .execute()
        .await?;
    Ok(Json(RankingsResponse { ok: true, rows }))
}
