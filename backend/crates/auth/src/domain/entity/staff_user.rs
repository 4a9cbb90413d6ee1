//! Staff User Entity
//!
//! Admin and HR accounts. The role is fixed at creation.

use chrono::{DateTime, Utc};
use kernel::email::Email;
use kernel::id::StaffUserId;
use kernel::principal::StaffRole;
use platform::password::HashedPassword;

/// Staff user entity
#[derive(Debug, Clone)]
pub struct StaffUser {
    pub id: StaffUserId,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub role: StaffRole,
    pub full_name: String,
    /// Inactive users cannot log in
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl StaffUser {
    pub fn can_login(&self) -> bool {
        self.is_active
    }
}

/// Staff user before the store assigns an id
#[derive(Debug, Clone)]
pub struct NewStaffUser {
    pub email: Email,
    pub password_hash: HashedPassword,
    pub role: StaffRole,
    pub full_name: String,
}

impl NewStaffUser {
    pub fn into_staff_user(self, id: StaffUserId, created_at: DateTime<Utc>) -> StaffUser {
        StaffUser {
            id,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role,
            full_name: self.full_name,
            is_active: true,
            created_at,
        }
    }
}
