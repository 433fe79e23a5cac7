//! Domain error types for the API key service.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

/// Message returned to callers for any storage failure.
pub const DATABASE_ERROR_MSG: &str = "database error";

/// Plain-text body for unmatched routes.
pub const NOT_FOUND_MSG: &str = "Not found";

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// No route or file matched the request
    #[error("Not found")]
    NotFound,

    /// Invalid input data
    #[error("{0}")]
    InvalidInput(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Database(err_str) => {
                tracing::error!("Database error: {}", err_str);
                DATABASE_ERROR_MSG.to_string()
            }
            AppError::NotFound => {
                return HttpResponse::NotFound()
                    .content_type("text/plain; charset=utf-8")
                    .body(NOT_FOUND_MSG);
            }
            AppError::InvalidInput(msg) => msg.clone(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse::new(message))
    }
}

/// Error response body: `{"success": false, "error": "..."}`.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}
