//! Unified error type for the simulation core.
//!
//! Mirrors the five error kinds spec.md §7 calls out, each with a fixed HTTP
//! status, grounded on the code-plus-`IntoResponse` idiom used by the
//! teacher's `api_auth::error::AuthError` / `transfer::error::TransferError`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Rule or quota rejection.
    #[error("{0}")]
    Validation(String),

    /// Insufficient balance, illegal state transition, not-owner, self-buy,
    /// packet/listing not found, invalid solution.
    #[error("{0}")]
    Domain(String),

    /// Bearer token absent or unknown.
    #[error("authentication required")]
    Auth,

    /// Actor mismatch between the submitted action and the authenticated player.
    #[error("actor mismatch")]
    Forbidden,

    /// Unknown entity / listing / packet / route.
    #[error("{0}")]
    NotFound(String),

    /// Concurrent-advance or unique-constraint clash.
    #[error("{0}")]
    Conflict(String),

    /// Store or broadcaster failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::Validation(_) | CoreError::Domain(_) => StatusCode::BAD_REQUEST,
            CoreError::Auth => StatusCode::UNAUTHORIZED,
            CoreError::Forbidden => StatusCode::FORBIDDEN,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Conflict(_) => StatusCode::CONFLICT,
            CoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => CoreError::NotFound("resource not found".to_string()),
            sqlx::Error::Database(dbe) if dbe.is_unique_violation() => {
                CoreError::Conflict(dbe.to_string())
            }
            other => CoreError::Internal(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        tracing::debug!(status = %self.status(), %detail, "request failed");
        (self.status(), Json(ErrorBody { detail })).into_response()
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
