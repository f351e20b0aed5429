//! Room Error Types
//!
//! Room-specific error variants that integrate with the unified
//! `kernel::error::AppError` rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Room-specific result type alias
pub type RoomResult<T> = Result<T, RoomError>;

/// Coarse failure taxonomy shared with non-HTTP callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomFailure {
    NotFound,
    Forbidden,
    StateConflict,
    ValidationFailed,
    AlreadySubmitted,
    StorageFailure,
}

#[derive(Debug, Error)]
pub enum RoomError {
    /// Unknown, malformed or expired room code
    #[error("Room not found")]
    RoomNotFound,

    #[error("Member not found in room")]
    MemberNotFound,

    /// Host token missing or wrong
    #[error("Host authorization failed")]
    Forbidden,

    #[error("Room is not in the lobby")]
    NotInLobby,

    #[error("Game already started")]
    AlreadyStarted,

    #[error("Game is not running")]
    NotRunning,

    #[error("Room cannot be reset while a game is running")]
    CannotResetNow,

    #[error("No puzzle available")]
    NoPuzzle,

    #[error("Wrong PIN")]
    BadPin,

    #[error("Nickname is required")]
    NicknameRequired,

    #[error("Affiliation is required")]
    AffiliationRequired,

    #[error("Nickname is taken")]
    NicknameTaken,

    #[error("Result already submitted")]
    AlreadySubmitted,

    /// Claimed score exceeds what the server-measured time allows
    #[error("Score {claimed} exceeds the attainable maximum {ceiling}")]
    ScoreRejected { claimed: u64, ceiling: u32 },

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RoomError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            RoomError::RoomNotFound => "not_found",
            RoomError::MemberNotFound => "member_not_found",
            RoomError::Forbidden => "forbidden",
            RoomError::NotInLobby => "not_in_lobby",
            RoomError::AlreadyStarted => "already_started",
            RoomError::NotRunning => "not_running",
            RoomError::CannotResetNow => "cannot_reset_now",
            RoomError::NoPuzzle => "no_puzzle",
            RoomError::BadPin => "bad_pin",
            RoomError::NicknameRequired => "nickname_required",
            RoomError::AffiliationRequired => "affiliation_required",
            RoomError::NicknameTaken => "nickname_taken",
            RoomError::AlreadySubmitted => "already_submitted",
            RoomError::ScoreRejected { .. } => "score_rejected",
            RoomError::RateLimited => "rate_limited",
            RoomError::InvalidBody(_) => "invalid_body",
            RoomError::Storage(_) | RoomError::Internal(_) => "storage_failure",
        }
    }

    pub fn failure(&self) -> RoomFailure {
        match self {
            RoomError::RoomNotFound | RoomError::MemberNotFound => RoomFailure::NotFound,
            RoomError::Forbidden => RoomFailure::Forbidden,
            RoomError::NotInLobby
            | RoomError::AlreadyStarted
            | RoomError::NotRunning
            | RoomError::CannotResetNow
            | RoomError::NoPuzzle => RoomFailure::StateConflict,
            RoomError::BadPin
            | RoomError::NicknameRequired
            | RoomError::AffiliationRequired
            | RoomError::NicknameTaken
            | RoomError::ScoreRejected { .. }
            | RoomError::RateLimited
            | RoomError::InvalidBody(_) => RoomFailure::ValidationFailed,
            RoomError::AlreadySubmitted => RoomFailure::AlreadySubmitted,
            RoomError::Storage(_) | RoomError::Internal(_) => RoomFailure::StorageFailure,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        if matches!(self, RoomError::RateLimited) {
            return ErrorKind::TooManyRequests;
        }
        match self.failure() {
            RoomFailure::NotFound => ErrorKind::NotFound,
            RoomFailure::Forbidden => ErrorKind::Forbidden,
            RoomFailure::StateConflict | RoomFailure::AlreadySubmitted => ErrorKind::Conflict,
            RoomFailure::ValidationFailed => ErrorKind::BadRequest,
            RoomFailure::StorageFailure => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            RoomError::Storage(e) => {
                tracing::error!(error = %e, "Room storage error");
            }
            RoomError::Internal(msg) => {
                tracing::error!(message = %msg, "Room internal error");
            }
            RoomError::Forbidden | RoomError::BadPin | RoomError::ScoreRejected { .. } => {
                tracing::warn!(error = %self, code = self.code(), "Room request rejected");
            }
            RoomError::RateLimited => {
                tracing::warn!("Room rate limit exceeded");
            }
            _ => {
                tracing::debug!(error = %self, code = self.code(), "Room error");
            }
        }
    }
}

impl From<RoomError> for AppError {
    fn from(err: RoomError) -> Self {
        let kind = err.kind();
        let code = err.code();
        match err {
            RoomError::Storage(e) => AppError::storage_failure().with_source(e),
            RoomError::Internal(_) => AppError::storage_failure(),
            other => AppError::new(kind, code, other.to_string()),
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for RoomError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        RoomError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for RoomError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
