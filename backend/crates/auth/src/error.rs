//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use cache::CacheError;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Input failed validation (name, email or password policy)
    #[error("{0}")]
    Validation(String),

    /// An account already exists for this email
    #[error("An account with this email already exists")]
    DuplicateIdentity,

    /// Unknown email or wrong password. The two are never distinguished.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Token malformed, unknown, revoked or expired
    #[error("Session is invalid or expired")]
    InvalidSession,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Internal error. The detail is logged, never returned to clients.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::DuplicateIdentity => StatusCode::CONFLICT,
            AuthError::InvalidCredentials | AuthError::InvalidSession => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::DuplicateIdentity => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::InvalidSession => ErrorKind::Unauthorized,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Validation(_) => "VALIDATION_ERROR",
            AuthError::DuplicateIdentity => "DUPLICATE_IDENTITY",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::InvalidSession => "INVALID_SESSION",
            AuthError::UserNotFound => "NOT_FOUND",
            AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let message = match self {
            AuthError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        AppError::new(self.kind(), message).with_code(self.code())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidSession => {
                tracing::debug!("Rejected bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let mut response = self.to_app_error().into_response();

        if matches!(self, AuthError::InvalidSession) {
            if let Ok(value) = platform::bearer::challenge("invalid_token").parse() {
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, value);
            }
        }

        response
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<CacheError> for AuthError {
    fn from(err: CacheError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_code_table() {
        let cases = [
            (AuthError::Validation("bad".into()), 400, "VALIDATION_ERROR"),
            (AuthError::DuplicateIdentity, 409, "DUPLICATE_IDENTITY"),
            (AuthError::InvalidCredentials, 401, "INVALID_CREDENTIALS"),
            (AuthError::InvalidSession, 401, "INVALID_SESSION"),
            (AuthError::UserNotFound, 404, "NOT_FOUND"),
            (AuthError::Internal("db".into()), 500, "INTERNAL_ERROR"),
        ];

        for (err, status, code) in cases {
            assert_eq!(err.status_code().as_u16(), status);
            assert_eq!(err.kind().status_code(), status);
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn test_internal_detail_not_exposed() {
        let err = AuthError::Internal("connection refused at 10.0.0.5".into());
        let app = err.to_app_error();
        assert_eq!(app.message(), "Internal server error");
        assert_eq!(app.code(), Some("INTERNAL_ERROR"));
    }

    #[test]
    fn test_invalid_session_sets_challenge() {
        let response = AuthError::InvalidSession.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer error=\"invalid_token\""
        );
    }

    #[test]
    fn test_app_error_becomes_internal() {
        let err: AuthError = AppError::service_unavailable("Database unavailable").into();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
