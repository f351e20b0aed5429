//! Error conversions - integration with sqlx and axum
//!
//! Feature-gated glue between [`AppError`] and the frameworks the domain
//! crates use.

#[cfg(feature = "axum")]
use super::app_error::AppError;

// ============================================================================
// SQLx helpers (feature-gated)
// ============================================================================

/// PostgreSQL `unique_violation`
#[cfg(feature = "sqlx")]
pub const PG_UNIQUE_VIOLATION: &str = "23505";

/// Whether a sqlx error is a primary-key / unique constraint collision.
///
/// Repositories use this to turn an expected collision (room code already
/// taken, duplicate solo submission) into a domain outcome instead of a
/// storage failure.
#[cfg(feature = "sqlx")]
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code.as_ref() == PG_UNIQUE_VIOLATION),
        _ => false,
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details, extended with the `ok`/`error` envelope
        // the polling clients key on
        let body = serde_json::json!({
            "ok": false,
            "error": self.code(),
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(feature = "axum")]
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::invalid_body(rejection.body_text())
    }
}
