//! Export Rankings Use Case

use chrono::{DateTime, Utc};
use puzzle::Difficulty;
use serde::Serialize;
use std::sync::Arc;

use crate::application::config::RankingConfig;
use crate::domain::entities::ExportRow;
use crate::domain::repository::{ExportQuery, RankingRepository};
use crate::domain::services::to_csv;
use crate::domain::value_objects::{ExportFormat, ExportScope, reporting_day};
use crate::error::{RankingError, RankingResult};

/// Input DTO for export
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportInput {
    pub scope: ExportScope,
    pub format: ExportFormat,
    /// Unknown difficulties do not filter
    pub difficulty: Option<Difficulty>,
}

/// Rendered export ready to be served as an attachment
#[derive(Debug, Clone)]
pub struct ExportOutput {
    pub scope: ExportScope,
    pub format: ExportFormat,
    pub rows: Vec<ExportRow>,
}

#[derive(Serialize)]
struct JsonExport<'a> {
    ok: bool,
    rows: &'a [ExportRow],
}

impl ExportOutput {
    pub fn file_name(&self) -> String {
        format!(
            "sudoku_rankings_{}.{}",
            self.scope.as_str(),
            self.format.extension()
        )
    }

    pub fn render(&self) -> RankingResult<String> {
        match self.format {
            ExportFormat::Csv => Ok(to_csv(&self.rows)),
            ExportFormat::Json => serde_json::to_string_pretty(&JsonExport {
                ok: true,
                rows: &self.rows,
            })
            .map_err(|e| RankingError::Internal(e.to_string())),
        }
    }
}

/// Export Rankings Use Case
pub struct ExportRankingsUseCase<R: RankingRepository> {
    repo: Arc<R>,
    config: Arc<RankingConfig>,
}

impl<R: RankingRepository> ExportRankingsUseCase<R> {
    pub fn new(repo: Arc<R>, config: Arc<RankingConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: ExportInput) -> RankingResult<ExportOutput> {
        self.execute_at(input, Utc::now()).await
    }

    pub async fn execute_at(
        &self,
        input: ExportInput,
        now: DateTime<Utc>,
    ) -> RankingResult<ExportOutput> {
        let query = ExportQuery {
            korea_date: match input.scope {
                ExportScope::Today => Some(reporting_day(now, self.config.day_offset)),
                ExportScope::Total => None,
            },
            difficulty: input.difficulty,
            limit: self.config.export_limit,
        };
        let rows = self.repo.export(&query).await?;

        tracing::info!(
            scope = input.scope.as_str(),
            format = input.format.extension(),
            rows = rows.len(),
            "Rankings exported"
        );
        Ok(ExportOutput {
            scope: input.scope,
            format: input.format,
            rows,
        })
    }
}
