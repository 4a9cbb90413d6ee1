//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Accounts, staff users, token claims, repository traits
//! - `application/` - Login gateways and staff administration
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, bearer middleware, router
//!
//! ## Features
//! - Applicant login with the one-time password issued at intake
//! - Staff login (admin / HR) against `staff_users` rows
//! - Admin-only staff user management and first-admin bootstrap
//!
//! ## Security Model
//! - Passwords hashed with Argon2id; verification runs off the async workers
//! - Unknown account, wrong password and wrong role all look identical
//! - Stateless HS256 bearer tokens (24h applicant, 8h staff)
//! - A staff member's role is always read from the stored row

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::memory::InMemoryAuthRepository;
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::{
    BearerAuthState, require_admin, require_applicant, require_staff,
};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAuthRepository as AuthStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
