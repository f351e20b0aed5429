//! Ranking Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type RankingResult<T> = Result<T, RankingError>;

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RankingError {
    pub fn code(&self) -> &'static str {
        match self {
            RankingError::InvalidBody(_) => "invalid_body",
            RankingError::InvalidQuery(_) => "invalid_query",
            RankingError::Storage(_) | RankingError::Internal(_) => "storage_failure",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RankingError::InvalidBody(_) | RankingError::InvalidQuery(_) => ErrorKind::BadRequest,
            RankingError::Storage(_) | RankingError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    fn log(&self) {
        match self {
            RankingError::Storage(e) => {
                tracing::error!(error = %e, "Ranking storage error");
            }
            RankingError::Internal(msg) => {
                tracing::error!(message = %msg, "Ranking internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Ranking request rejected");
            }
        }
    }
}

impl From<RankingError> for AppError {
    fn from(err: RankingError) -> Self {
        let kind = err.kind();
        let code = err.code();
        match err {
            RankingError::Storage(e) => AppError::storage_failure().with_source(e),
            RankingError::Internal(_) => AppError::storage_failure(),
            other => AppError::new(kind, code, other.to_string()),
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for RankingError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        RankingError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for RankingError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
