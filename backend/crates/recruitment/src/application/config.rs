//! Application Configuration
//!
//! Configuration for the recruitment application layer.

use std::path::PathBuf;
use std::time::Duration;

use regex::Regex;

/// Indian 10-digit mobile number
pub const DEFAULT_MOBILE_PATTERN: &str = r"^[6-9][0-9]{9}$";

/// Intake validation and scheduling rules
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Minimum trimmed length of first/last name and graduation
    pub name_min_len: usize,
    /// Minimum trimmed length of the postal address
    pub address_min_len: usize,
    /// Accepted mobile numbers
    pub mobile_pattern: Regex,
    /// Maximum résumé size in bytes
    pub max_resume_bytes: usize,
    /// Lowercase extensions without the dot
    pub allowed_resume_extensions: Vec<String>,
    /// Delay between submission and the aptitude test invitation
    pub invitation_delay: Duration,
    /// Days between submission and the announced test date
    pub test_days_ahead: i64,
    /// Hour of day (local to `schedule_utc_offset_minutes`) of the test
    pub test_hour: u32,
    /// Offset used when announcing the test time (IST = 330)
    pub schedule_utc_offset_minutes: i32,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            name_min_len: 2,
            address_min_len: 10,
            mobile_pattern: Regex::new(DEFAULT_MOBILE_PATTERN)
                .expect("default mobile pattern is a valid regex"),
            max_resume_bytes: 5 * 1024 * 1024,
            allowed_resume_extensions: vec!["pdf".into(), "doc".into(), "docx".into()],
            invitation_delay: Duration::from_secs(120),
            test_days_ahead: 2,
            test_hour: 11,
            schedule_utc_offset_minutes: 330,
        }
    }
}

impl IntakeConfig {
    pub fn is_allowed_extension(&self, extension: &str) -> bool {
        self.allowed_resume_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }

    /// "PDF, DOC, DOCX" for error messages
    pub fn allowed_extensions_label(&self) -> String {
        self.allowed_resume_extensions
            .iter()
            .map(|ext| ext.to_ascii_uppercase())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Addresses used when composing notification emails
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// HR inbox receiving the admin alert with the résumé attached
    pub admin_email: String,
    /// Frontend base URL behind the "Start Test" link
    pub client_base_url: String,
}

/// Recruitment application configuration
#[derive(Debug, Clone)]
pub struct RecruitmentConfig {
    pub intake: IntakeConfig,
    pub notification: NotificationConfig,
    /// Directory receiving uploaded résumés
    pub upload_dir: PathBuf,
}

impl RecruitmentConfig {
    pub fn new(notification: NotificationConfig, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            intake: IntakeConfig::default(),
            notification,
            upload_dir: upload_dir.into(),
        }
    }

    /// Request body limit for the application form: résumé plus text fields
    pub fn max_form_bytes(&self) -> usize {
        self.intake.max_resume_bytes + 64 * 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extensions() {
        let config = IntakeConfig::default();
        assert!(config.is_allowed_extension("PDF"));
        assert!(config.is_allowed_extension("docx"));
        assert!(!config.is_allowed_extension("exe"));
        assert_eq!(config.allowed_extensions_label(), "PDF, DOC, DOCX");
    }

    #[test]
    fn test_default_mobile_pattern() {
        let config = IntakeConfig::default();
        assert!(config.mobile_pattern.is_match("9876543210"));
        assert!(!config.mobile_pattern.is_match("5876543210"));
    }
}
