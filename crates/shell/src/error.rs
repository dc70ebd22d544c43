//! Application error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failures while obtaining the federation manifest.
///
/// Fetch and parse failures are logged and swallowed per source; only the
/// exhaustion of every source surfaces to callers, as `Unavailable`.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Network failure, unreadable file, or non-2xx response from a source.
    #[error("manifest fetch failed: {0}")]
    FetchFailed(#[source] anyhow::Error),

    /// The source answered but the document was malformed.
    #[error("manifest parse failed: {0}")]
    ParseFailed(#[source] serde_json::Error),

    /// No source yielded a manifest. Terminal; the caller decides whether
    /// to retry, fall back, or abort.
    #[error("federation manifest not loaded")]
    Unavailable,
}

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("not found")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("federation manifest not loaded")]
    ManifestUnavailable,

    #[error("remote module load failed")]
    RemoteLoadFailed(#[source] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ManifestUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::RemoteLoadFailed(_) => StatusCode::BAD_GATEWAY,
        };

        // In development, include error details; in production, be vague
        let body = match &self {
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal server error");
                "internal server error".to_string()
            }
            AppError::RemoteLoadFailed(e) => {
                tracing::error!(error = %e, "remote module load failed");
                "remote module load failed".to_string()
            }
            _ => self.to_string(),
        };

        (status, body).into_response()
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;
