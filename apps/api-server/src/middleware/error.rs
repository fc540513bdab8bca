//! Error handling - maps failures onto `{ "error": ... }` responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use blog_core::DomainError;
use blog_shared::ErrorResponse;

/// Application-level error type.
///
/// Server-side failures carry a generic public message plus the underlying
/// detail; only the public message reaches the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{message}: {detail}")]
    Internal {
        message: &'static str,
        detail: String,
    },
}

impl AppError {
    pub fn internal(message: &'static str, detail: impl ToString) -> Self {
        AppError::Internal {
            message,
            detail: detail.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::BadRequest(msg) => ErrorResponse::new(msg.as_str()),
            AppError::NotFound(msg) => ErrorResponse::new(msg.as_str()),
            AppError::Internal { message, detail } => {
                tracing::error!("{}: {}", message, detail);
                ErrorResponse::new(*message)
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::NotFound(_) => AppError::NotFound(ErrorResponse::blog_not_found().error),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
