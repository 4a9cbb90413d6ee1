//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::email::Email;
use kernel::principal::StaffRole;

use crate::domain::entity::{AptitudeAccount, NewStaffUser, StaffUser};
use crate::error::AuthResult;

/// Aptitude account repository trait
#[trait_variant::make(AptitudeAccountRepository: Send)]
pub trait LocalAptitudeAccountRepository {
    /// Find the credential issued for an applicant email
    async fn find_account_by_email(&self, email: &Email) -> AuthResult<Option<AptitudeAccount>>;
}

/// Staff user repository trait
#[trait_variant::make(StaffUserRepository: Send)]
pub trait LocalStaffUserRepository {
    /// Find an active staff user holding the given role
    async fn find_active_staff(
        &self,
        email: &Email,
        role: StaffRole,
    ) -> AuthResult<Option<StaffUser>>;

    /// Create a staff user; a duplicate email yields `AuthError::Conflict`
    async fn create_staff_user(&self, user: &NewStaffUser) -> AuthResult<StaffUser>;

    /// All staff users, newest first
    async fn list_staff_users(&self) -> AuthResult<Vec<StaffUser>>;

    async fn count_staff_users(&self) -> AuthResult<i64>;
}
