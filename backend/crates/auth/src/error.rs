//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordPolicyError;
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown account, wrong password or wrong role
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No bearer token on a protected route
    #[error("Authentication required")]
    MissingToken,

    /// Bearer token failed verification or expired
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Authenticated, but not allowed on this route
    #[error("You do not have access to this resource")]
    Forbidden,

    /// Staff email already registered
    #[error("{0}")]
    Conflict(String),

    /// Staff password does not satisfy the policy
    #[error("{0}")]
    PasswordPolicy(#[from] PasswordPolicyError),

    /// A submitted field failed validation
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Request body missing, unparsable or of the wrong shape
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AuthError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::InvalidToken => {
                ErrorKind::Unauthorized
            }
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::Conflict(_) => ErrorKind::Conflict,
            AuthError::PasswordPolicy(_)
            | AuthError::Validation { .. }
            | AuthError::MalformedBody(_) => ErrorKind::BadRequest,
            AuthError::Database(sqlx::Error::PoolTimedOut) => ErrorKind::ServiceUnavailable,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(sqlx::Error::PoolTimedOut) => {
                tracing::warn!("Database pool exhausted");
            }
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::Forbidden => {
                tracing::warn!("Access denied for authenticated caller");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        match err {
            AuthError::Validation { field, message } => AppError::validation(field, message),
            AuthError::PasswordPolicy(_) => AppError::validation("password", message),
            AuthError::MissingToken | AuthError::InvalidToken => {
                AppError::unauthorized(message).with_action("Log in again")
            }
            AuthError::Conflict(_) => AppError::conflict(message).with_field("email"),
            AuthError::MalformedBody(_) => AppError::bad_request(message)
                .with_action("Send a JSON body with every required field"),
            AuthError::Database(e) => AppError::new(kind, message).with_source(e),
            _ => AppError::new(kind, message),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired | TokenError::Invalid => AuthError::InvalidToken,
            TokenError::WeakSecret | TokenError::Sign(_) => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::MalformedBody(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::Conflict("taken".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AuthError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AuthError::MalformedBody("missing field `password`".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_invalid_credentials_detail_is_generic() {
        let app: AppError = AuthError::InvalidCredentials.into();
        assert_eq!(app.public_detail(), "Invalid credentials");
        assert_eq!(app.field(), None);
    }

    #[test]
    fn test_password_policy_points_at_password_field() {
        let err = AuthError::from(PasswordPolicyError::TooShort { min: 8, actual: 3 });
        let app: AppError = err.into();
        assert_eq!(app.field(), Some("password"));
    }

    #[test]
    fn test_token_errors_map_to_unauthorized() {
        assert!(matches!(AuthError::from(TokenError::Expired), AuthError::InvalidToken));
        assert!(matches!(
            AuthError::from(TokenError::Sign("boom".into())),
            AuthError::Internal(_)
        ));
    }
}
