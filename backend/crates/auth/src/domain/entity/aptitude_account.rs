//! Aptitude Account Entity
//!
//! Login credential provisioned for an applicant at intake. The auth context
//! only ever reads it.

use chrono::{DateTime, Utc};
use kernel::email::Email;
use kernel::id::CredentialId;
use platform::password::HashedPassword;

#[derive(Debug, Clone)]
pub struct AptitudeAccount {
    pub id: CredentialId,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub created_at: DateTime<Utc>,
}
