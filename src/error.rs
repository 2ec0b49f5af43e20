// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::database::RepositoryError;

/// Client-facing error. Every variant renders as `{ "error": message }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // 400 Bad Request: no or non-admin session on a gateway route
    Unauthorized(String),

    // 401 Unauthorized: session-required routes such as whoami
    Unauthenticated(String),

    // 400 Bad Request: anything that went wrong after authorization
    OperationFailed(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::OperationFailed(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Unauthorized(msg) => msg,
            ApiError::Unauthenticated(msg) => msg,
            ApiError::OperationFailed(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }

    pub fn unauthorized() -> Self {
        ApiError::Unauthorized("Unauthorized".to_string())
    }

    pub fn unauthenticated() -> Self {
        ApiError::Unauthenticated("Unauthorized".to_string())
    }

    pub fn operation_failed(message: impl Into<String>) -> Self {
        ApiError::OperationFailed(message.into())
    }

    /// Same message, re-tagged as a 401 for session-required routes
    pub fn into_unauthenticated(self) -> Self {
        match self {
            ApiError::Unauthorized(msg) => ApiError::Unauthenticated(msg),
            other => other,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match &err {
            RepositoryError::Sqlx(e) => tracing::error!("Database error: {}", e),
            other => tracing::warn!("Repository error: {}", other),
        }
        ApiError::operation_failed(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        tracing::debug!("Session rejected: {}", err);
        ApiError::unauthorized()
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
