//! Recruitment Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, grading and naming rules, repository traits
//! - `application/` - Use cases (intake, job postings, aptitude tests)
//! - `notification/` - Applicant and HR emails, immediate or deferred
//! - `infra/` - PostgreSQL and in-memory stores, résumé storage
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Intake Model
//! - A submission is validated completely before anything touches disk or the store
//! - Application and aptitude credential are inserted in one transaction
//! - Emails are fire-and-forget; a failed send never affects the stored application
//! - The one-time password exists in plaintext only inside the pending invitation

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod notification;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{IntakeConfig, NotificationConfig, RecruitmentConfig};
pub use error::{RecruitmentError, RecruitmentResult};
pub use infra::memory::InMemoryRecruitmentRepository;
pub use infra::postgres::PgRecruitmentRepository;
pub use infra::resume_store::ResumeStore;
pub use notification::dispatcher::NotificationDispatcher;
pub use presentation::router::{RecruitmentRouters, recruitment_routers};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

#[cfg(test)]
mod tests;
