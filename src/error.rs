use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Client-facing errors; every variant maps to a status code and an
/// `{"error": "..."}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input.
    #[error("{0}")]
    Validation(String),

    /// Signup with an email that already has an account.
    #[error("Email already registered")]
    EmailTaken,

    /// Login failure; identical whether the email or the password was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing or unverifiable token.
    #[error("{0}")]
    Unauthorized(&'static str),

    /// Resource absent, or owned by someone else.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Unexpected failure; logged, never surfaced.
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::EmailTaken | ApiError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(e) = &self {
            error!(error = %e, "request failed");
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
