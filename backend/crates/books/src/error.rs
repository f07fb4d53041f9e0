//! Book Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type BookResult<T> = Result<T, BookError>;

#[derive(Debug, Error)]
pub enum BookError {
    #[error("{0}")]
    Validation(String),

    #[error("Book not found")]
    NotFound,

    /// The caller does not own the book. Never says who does.
    #[error("You are not allowed to access this book")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BookError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BookError::Validation(_) => StatusCode::BAD_REQUEST,
            BookError::NotFound => StatusCode::NOT_FOUND,
            BookError::Forbidden => StatusCode::FORBIDDEN,
            BookError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BookError::Validation(_) => ErrorKind::BadRequest,
            BookError::NotFound => ErrorKind::NotFound,
            BookError::Forbidden => ErrorKind::Forbidden,
            BookError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            BookError::Validation(_) => "VALIDATION_ERROR",
            BookError::NotFound => "NOT_FOUND",
            BookError::Forbidden => "FORBIDDEN",
            BookError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn to_app_error(&self) -> AppError {
        let message = match self {
            BookError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        AppError::new(self.kind(), message).with_code(self.code())
    }

    fn log(&self) {
        match self {
            BookError::Internal(msg) => {
                tracing::error!(message = %msg, "Books internal error");
            }
            BookError::Forbidden => {
                tracing::warn!("Ownership check failed");
            }
            _ => {
                tracing::debug!(error = %self, "Books error");
            }
        }
    }
}

impl IntoResponse for BookError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// Repository errors: a vanished row is `NotFound`, bad input stays a
/// validation error, everything else is internal.
impl From<AppError> for BookError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::NotFound => BookError::NotFound,
            ErrorKind::BadRequest | ErrorKind::UnprocessableEntity => {
                BookError::Validation(err.message().to_string())
            }
            _ => BookError::Internal(err.to_string()),
        }
    }
}
