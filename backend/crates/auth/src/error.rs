//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Messages for credential failures are fixed and non-distinguishing:
//! an unknown email and a wrong password produce byte-identical
//! responses (enumeration resistance).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Duplicate email on registration
    #[error("User already exists")]
    EmailTaken,

    /// Wrong password or unknown email (deliberately indistinguishable)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No refresh token cookie on the request
    #[error("Refresh token required")]
    RefreshTokenRequired,

    /// Refresh token failed signature, expiry, or stored-hash check
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// verify-token called without a token value
    #[error("Token is required")]
    TokenRequired,

    /// Access token failed signature or expiry check
    #[error("Invalid or expired token")]
    InvalidToken,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::InvalidCredentials
            | AuthError::RefreshTokenRequired
            | AuthError::InvalidRefreshToken
            | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::TokenRequired | AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::RefreshTokenRequired
            | AuthError::InvalidRefreshToken
            | AuthError::InvalidToken => ErrorKind::Unauthorized,
            AuthError::TokenRequired | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidRefreshToken => {
                tracing::warn!("Refresh attempt with invalid token");
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
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_messages_are_stable() {
        // Clients match on these strings; they are part of the API contract.
        assert_eq!(AuthError::EmailTaken.to_string(), "User already exists");
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid credentials"
        );
        assert_eq!(
            AuthError::RefreshTokenRequired.to_string(),
            "Refresh token required"
        );
        assert_eq!(
            AuthError::InvalidRefreshToken.to_string(),
            "Invalid refresh token"
        );
        assert_eq!(AuthError::TokenRequired.to_string(), "Token is required");
        assert_eq!(
            AuthError::InvalidToken.to_string(),
            "Invalid or expired token"
        );
        assert_eq!(AuthError::UserNotFound.to_string(), "User not found");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::RefreshTokenRequired.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::TokenRequired.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(AuthError::EmailTaken.kind(), ErrorKind::Conflict);
        assert_eq!(AuthError::InvalidToken.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::UserNotFound.kind(), ErrorKind::NotFound);
    }
}
