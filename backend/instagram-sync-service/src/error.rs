/// Error types for Instagram Sync Service
///
/// Every failure is mapped to an HTTP status at the handler boundary and
/// rendered as `{"error": <message>, "status": <code>}`.
use crate::instagram::ApiError;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found (locally or on Instagram)
    #[error("{0}")]
    NotFound(String),

    /// Bad request, including rejected remote submissions
    #[error("{0}")]
    BadRequest(String),

    /// Request body failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Remote API failed where no more specific mapping applies
    #[error("Instagram API error: {0}")]
    Remote(#[from] ApiError),

    /// Internal server error
    #[error("{0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Remote(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        }

        HttpResponse::build(status).json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}
