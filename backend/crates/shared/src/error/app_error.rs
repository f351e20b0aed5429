//! Application Error - Unified rendered error
//!
//! Defines [`AppError`] struct and [`AppResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// アプリケーション統一エラー型
///
/// 各ドメインの `thiserror` 列挙体はレスポンス生成の直前にこの型へ変換されます。
/// クライアントに見せてよい情報だけを保持します。
///
/// ## Fields
/// * `kind` - エラーの分類（HTTP ステータスコードにマッピング）
/// * `code` - 機械可読な理由コード（`"not_found"`, `"bad_pin"` など）
/// * `message` - ユーザー向けのエラーメッセージ（ストレージの生メッセージは含めない）
/// * `source` - 元のエラー（オプション、サーバー側ログ専用）
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::Conflict, "already_submitted", "Result already submitted");
/// assert_eq!(err.code(), "already_submitted");
/// assert_eq!(err.status_code(), 409);
/// ```
pub struct AppError {
    /// エラー種別
    kind: ErrorKind,
    /// 理由コード
    code: Cow<'static, str>,
    /// ユーザー向けメッセージ
    message: Cow<'static, str>,
    /// 元のエラー（デバッグ用）
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// アプリケーション結果型エイリアス
///
/// `Result<T, AppError>` の省略形です。
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// 新しいエラーを作成
    ///
    /// ## Arguments
    /// * `kind` - エラー種別
    /// * `code` - 理由コード
    /// * `message` - ユーザー向けメッセージ
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::{app_error::AppError, kind::ErrorKind};
    /// let err = AppError::new(ErrorKind::NotFound, "not_found", "Room not found");
    /// assert_eq!(err.status_code(), 404);
    /// ```
    #[inline]
    pub fn new(
        kind: ErrorKind,
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            source: None,
        }
    }

    /// 400 Bad Request エラー（理由コード `invalid_body`）
    #[inline]
    pub fn invalid_body(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, "invalid_body", message)
    }

    /// 500 Internal Server Error（理由コード `storage_failure`）
    ///
    /// メッセージは固定で、ストレージの詳細はクライアントに返しません。
    /// 元のエラーは [`AppError::with_source`] でログ用に保持します。
    #[inline]
    pub fn storage_failure() -> Self {
        Self::new(
            ErrorKind::InternalServerError,
            "storage_failure",
            "Storage failure",
        )
    }

    /// 元のエラーを設定（デバッグ用）
    ///
    /// ## Arguments
    /// * `source` - 元のエラー
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// エラー種別を取得
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 理由コードを取得
    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// HTTP ステータスコードを取得
    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// メッセージを取得
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// サーバーエラーかどうか
    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("code", &self.code);
        builder.field("message", &self.message);
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.code, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = AppError::new(ErrorKind::NotFound, "not_found", "Room not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.code(), "not_found");
        assert_eq!(err.message(), "Room not found");
    }

    #[test]
    fn test_storage_failure_hides_detail() {
        let io_err = std::io::Error::other("connection reset by peer");
        let err = AppError::storage_failure().with_source(io_err);
        assert_eq!(err.code(), "storage_failure");
        assert_eq!(err.message(), "Storage failure");
        assert!(err.is_server_error());
        assert!(err.source().is_some());
        assert!(!err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_invalid_body() {
        let err = AppError::invalid_body("expected JSON");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.code(), "invalid_body");
    }

    #[test]
    fn test_display() {
        let err = AppError::new(ErrorKind::Forbidden, "forbidden", "Host only");
        assert_eq!(err.to_string(), "[Forbidden] forbidden: Host only");
    }
}
