//! Recruitment Error Types
//!
//! This module provides recruitment-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Recruitment-specific result type alias
pub type RecruitmentResult<T> = Result<T, RecruitmentError>;

/// Recruitment-specific error variants
#[derive(Debug, Error)]
pub enum RecruitmentError {
    /// A submitted field failed validation
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Résumé extension not accepted
    #[error("Resume must be one of: {allowed}")]
    FileType { allowed: String },

    /// An application with the same email exists
    #[error("An application with this email already exists")]
    DuplicateApplicant,

    /// Request body larger than the configured limit
    #[error("Upload is larger than the allowed size")]
    PayloadTooLarge,

    /// Malformed multipart or JSON body
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Generic uniqueness conflict (e.g. job posting natural key)
    #[error("{0}")]
    Conflict(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Résumé could not be written
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RecruitmentError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        RecruitmentError::Validation {
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
            RecruitmentError::Validation { .. }
            | RecruitmentError::FileType { .. }
            | RecruitmentError::MalformedBody(_) => ErrorKind::BadRequest,
            RecruitmentError::DuplicateApplicant | RecruitmentError::Conflict(_) => {
                ErrorKind::Conflict
            }
            RecruitmentError::PayloadTooLarge => ErrorKind::PayloadTooLarge,
            RecruitmentError::NotFound(_) => ErrorKind::NotFound,
            RecruitmentError::Database(sqlx::Error::PoolTimedOut) => ErrorKind::ServiceUnavailable,
            RecruitmentError::Database(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                ErrorKind::Conflict
            }
            RecruitmentError::Storage(_)
            | RecruitmentError::Database(_)
            | RecruitmentError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            RecruitmentError::Storage(e) => {
                tracing::error!(error = %e, "Resume storage error");
            }
            RecruitmentError::Database(sqlx::Error::PoolTimedOut) => {
                tracing::warn!("Database pool exhausted");
            }
            RecruitmentError::Database(e) => {
                tracing::error!(error = %e, "Recruitment database error");
            }
            RecruitmentError::Internal(msg) => {
                tracing::error!(message = %msg, "Recruitment internal error");
            }
            RecruitmentError::DuplicateApplicant => {
                tracing::info!("Duplicate application rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Recruitment request rejected");
            }
        }
    }
}

impl From<RecruitmentError> for AppError {
    fn from(err: RecruitmentError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        match err {
            RecruitmentError::Validation { field, message } => AppError::validation(field, message),
            RecruitmentError::FileType { .. } => AppError::bad_request(message)
                .with_field("resume")
                .with_action("Upload a PDF, DOC or DOCX file"),
            RecruitmentError::DuplicateApplicant => AppError::conflict(message)
                .with_field("email")
                .with_action("Use a different email address"),
            RecruitmentError::Storage(e) => AppError::new(kind, message).with_source(e),
            RecruitmentError::Database(e) => AppError::new(kind, message).with_source(e),
            _ => AppError::new(kind, message),
        }
    }
}

impl IntoResponse for RecruitmentError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<axum::extract::multipart::MultipartError> for RecruitmentError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            RecruitmentError::PayloadTooLarge
        } else {
            RecruitmentError::MalformedBody(err.body_text())
        }
    }
}

impl From<JsonRejection> for RecruitmentError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            RecruitmentError::PayloadTooLarge
        } else {
            RecruitmentError::MalformedBody(rejection.body_text())
        }
    }
}

impl From<MultipartRejection> for RecruitmentError {
    fn from(rejection: MultipartRejection) -> Self {
        RecruitmentError::MalformedBody(rejection.body_text())
    }
}

impl From<PathRejection> for RecruitmentError {
    fn from(rejection: PathRejection) -> Self {
        RecruitmentError::validation("id", rejection.body_text())
    }
}
