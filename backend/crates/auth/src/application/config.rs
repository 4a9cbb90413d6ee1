//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Lifetime of an applicant aptitude token (24 hours)
    pub applicant_token_ttl: Duration,
    /// Lifetime of a staff token (8 hours)
    pub staff_token_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            applicant_token_ttl: Duration::from_secs(24 * 3600),
            staff_token_ttl: Duration::from_secs(8 * 3600),
        }
    }
}

impl AuthConfig {
    pub fn applicant_ttl_secs(&self) -> i64 {
        self.applicant_token_ttl.as_secs() as i64
    }

    pub fn staff_ttl_secs(&self) -> i64 {
        self.staff_token_ttl.as_secs() as i64
    }
}
