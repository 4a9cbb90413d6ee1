//! Bearer Token Claims
//!
//! One claim shape for both audiences. A staff token carries `role` and
//! `full_name`; an applicant token carries neither.

use kernel::email::Email;
use kernel::principal::{Principal, StaffRole};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{AptitudeAccount, StaffUser};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub user_id: i64,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn for_applicant(account: &AptitudeAccount, issued_at: i64, ttl_secs: i64) -> Self {
        let user_id = account.id.as_i64();
        Self {
            sub: user_id.to_string(),
            user_id,
            email: account.email.as_str().to_string(),
            role: None,
            full_name: None,
            iat: issued_at,
            exp: issued_at + ttl_secs,
        }
    }

    pub fn for_staff(user: &StaffUser, issued_at: i64, ttl_secs: i64) -> Self {
        let user_id = user.id.as_i64();
        Self {
            sub: user_id.to_string(),
            user_id,
            email: user.email.as_str().to_string(),
            role: Some(user.role.code().to_string()),
            full_name: Some(user.full_name.clone()),
            iat: issued_at,
            exp: issued_at + ttl_secs,
        }
    }

    /// Map verified claims to the caller identity
    ///
    /// `None` when a role claim is present but not a known staff role.
    pub fn into_principal(self) -> Option<Principal> {
        let email = Email::from_db(self.email);
        match self.role {
            None => Some(Principal::Applicant {
                subject_id: self.user_id,
                email,
            }),
            Some(code) => Some(Principal::Staff {
                subject_id: self.user_id,
                email,
                role: StaffRole::from_code(&code)?,
                full_name: self.full_name.unwrap_or_default(),
            }),
        }
    }
}
