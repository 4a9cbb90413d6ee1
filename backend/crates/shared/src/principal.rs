//! Authenticated principal
//!
//! Produced by the auth gateway after a bearer token has been verified and
//! consumed by any handler that needs to know who is calling.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::email::Email;

/// Role of a staff account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Admin,
    Hr,
}

impl StaffRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            StaffRole::Admin => "admin",
            StaffRole::Hr => "hr",
        }
    }

    /// Parse a stored or submitted role code; unknown codes yield `None`.
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(StaffRole::Admin),
            "hr" => Some(StaffRole::Hr),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, StaffRole::Admin)
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Caller identity attached to a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// Applicant holding an aptitude token
    Applicant { subject_id: i64, email: Email },
    /// HR or admin staff member
    Staff {
        subject_id: i64,
        email: Email,
        role: StaffRole,
        full_name: String,
    },
}

impl Principal {
    pub fn email(&self) -> &Email {
        match self {
            Principal::Applicant { email, .. } | Principal::Staff { email, .. } => email,
        }
    }

    pub fn subject_id(&self) -> i64 {
        match self {
            Principal::Applicant { subject_id, .. } | Principal::Staff { subject_id, .. } => {
                *subject_id
            }
        }
    }

    pub fn staff_role(&self) -> Option<StaffRole> {
        match self {
            Principal::Staff { role, .. } => Some(*role),
            Principal::Applicant { .. } => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.staff_role().is_some_and(|role| role.is_admin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_codes() {
        assert_eq!(StaffRole::from_code("Admin"), Some(StaffRole::Admin));
        assert_eq!(StaffRole::from_code("hr"), Some(StaffRole::Hr));
        assert_eq!(StaffRole::from_code("recruiter"), None);
        assert_eq!(StaffRole::Hr.to_string(), "hr");
    }

    #[test]
    fn test_principal_admin_check() {
        let hr = Principal::Staff {
            subject_id: 2,
            email: Email::from_db("hr@example.com"),
            role: StaffRole::Hr,
            full_name: "HR".into(),
        };
        let applicant = Principal::Applicant {
            subject_id: 5,
            email: Email::from_db("a@example.com"),
        };
        assert!(!hr.is_admin());
        assert!(!applicant.is_admin());
        assert_eq!(applicant.staff_role(), None);
        assert_eq!(hr.subject_id(), 2);
    }
}
