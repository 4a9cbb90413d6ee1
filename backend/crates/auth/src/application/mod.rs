//! Application Layer
//!
//! Use cases and application services.

pub mod applicant_login;
pub mod config;
mod credentials;
pub mod staff_admin;
pub mod staff_login;

// Re-exports
pub use applicant_login::{ApplicantLoginInput, ApplicantLoginOutput, ApplicantLoginUseCase};
pub use config::AuthConfig;
pub use staff_admin::{
    BootstrapAdmin, BootstrapAdminUseCase, CreateStaffUserInput, CreateStaffUserUseCase,
    ListStaffUsersUseCase,
};
pub use staff_login::{StaffLoginInput, StaffLoginOutput, StaffLoginUseCase};
