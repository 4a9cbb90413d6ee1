//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{aptitude_account::AptitudeAccount, staff_user::StaffUser};
pub use repository::{AptitudeAccountRepository, StaffUserRepository};
