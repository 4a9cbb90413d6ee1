//! Domain Value Objects

use std::fmt;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{RecruitmentError, RecruitmentResult};

/// Lowest and highest CGPA on the 10-point scale
pub const CGPA_MIN: f64 = 0.0;
pub const CGPA_MAX: f64 = 10.0;

/// Mobile number accepted by the configured pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MobileNumber(String);

impl MobileNumber {
    pub fn parse(raw: &str, pattern: &Regex) -> RecruitmentResult<Self> {
        let trimmed = raw.trim();
        if !pattern.is_match(trimmed) {
            return Err(RecruitmentError::validation(
                "mobile",
                "Please enter a valid 10-digit mobile number",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Cumulative grade point average, 0.0 to 10.0 inclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cgpa(f64);

impl Cgpa {
    pub fn parse(raw: &str) -> RecruitmentResult<Self> {
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| RecruitmentError::validation("cgpa", "CGPA must be a number"))?;
        Self::new(value)
    }

    pub fn new(value: f64) -> RecruitmentResult<Self> {
        if !value.is_finite() || !(CGPA_MIN..=CGPA_MAX).contains(&value) {
            return Err(RecruitmentError::validation(
                "cgpa",
                "CGPA must be between 0 and 10",
            ));
        }
        Ok(Self(value))
    }

    pub fn from_db(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Cgpa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Original name of an uploaded résumé and its lowercase extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFileName {
    original: String,
    extension: String,
}

impl ResumeFileName {
    pub fn parse(raw: &str) -> RecruitmentResult<Self> {
        // Browsers on Windows may send a full path
        let original = raw
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        if original.is_empty() {
            return Err(RecruitmentError::validation("resume", "Please upload your resume"));
        }

        let extension = Path::new(&original)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        Ok(Self { original, extension })
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Lowercase extension without the dot; empty when there is none
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// MIME type announced for the attachment
    pub fn content_type(&self) -> &'static str {
        content_type_for_extension(&self.extension)
    }
}

pub fn content_type_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

/// Difficulty tier of an aptitude question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::DEFAULT_MOBILE_PATTERN;

    fn field_of(err: RecruitmentError) -> &'static str {
        match err {
            RecruitmentError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_cgpa_bounds() {
        assert!(Cgpa::parse("0").is_ok());
        assert!(Cgpa::parse("10").is_ok());
        assert!(Cgpa::parse("8.5").is_ok());
        assert_eq!(field_of(Cgpa::parse("-0.01").unwrap_err()), "cgpa");
        assert_eq!(field_of(Cgpa::parse("10.01").unwrap_err()), "cgpa");
        assert_eq!(field_of(Cgpa::parse("NaN").unwrap_err()), "cgpa");
        assert_eq!(field_of(Cgpa::parse("inf").unwrap_err()), "cgpa");
        assert_eq!(field_of(Cgpa::parse("eight").unwrap_err()), "cgpa");
    }

    #[test]
    fn test_mobile_pattern() {
        let pattern = Regex::new(DEFAULT_MOBILE_PATTERN).unwrap();
        assert!(MobileNumber::parse("9876543210", &pattern).is_ok());
        assert!(MobileNumber::parse(" 6000000000 ", &pattern).is_ok());
        assert_eq!(field_of(MobileNumber::parse("987654321", &pattern).unwrap_err()), "mobile");
        assert_eq!(field_of(MobileNumber::parse("98765x3210", &pattern).unwrap_err()), "mobile");
        assert_eq!(field_of(MobileNumber::parse("1234567890", &pattern).unwrap_err()), "mobile");
    }

    #[test]
    fn test_resume_file_name() {
        let name = ResumeFileName::parse("C:\\Users\\me\\My CV.DOCX").unwrap();
        assert_eq!(name.original(), "My CV.DOCX");
        assert_eq!(name.extension(), "docx");
        assert_eq!(
            name.content_type(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );

        assert_eq!(ResumeFileName::parse("resume").unwrap().extension(), "");
        assert_eq!(field_of(ResumeFileName::parse("  ").unwrap_err()), "resume");
    }

    #[test]
    fn test_difficulty_codes() {
        assert_eq!(Difficulty::from_code("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_code("expert"), None);
        assert_eq!(serde_json::to_string(&Difficulty::Easy).unwrap(), "\"easy\"");
    }
}
