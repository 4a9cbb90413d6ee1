//! Domain Services
//!
//! Pure domain logic: résumé naming, test scheduling and grading.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, FixedOffset, TimeZone, Utc};

use crate::domain::entities::{AptitudeQuestion, QuestionSnapshot};
use crate::error::{RecruitmentError, RecruitmentResult};

const MAX_SANITIZED_NAME_LEN: usize = 100;

/// Reduce a client-supplied file name to `[A-Za-z0-9._-]`
///
/// Leading dots are stripped so the stored file is never hidden.
pub fn sanitize_file_name(original: &str) -> String {
    let mapped: String = original
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = mapped.trim_start_matches('.');
    let mut name: String = if trimmed.len() > MAX_SANITIZED_NAME_LEN {
        // Keep the tail so the extension survives
        trimmed[trimmed.len() - MAX_SANITIZED_NAME_LEN..].to_string()
    } else {
        trimmed.to_string()
    };

    if name.is_empty() {
        name.push_str("resume");
    }
    name
}

/// `YYYYmmdd_HHMMSS_<token>_<sanitized original>`
pub fn stored_resume_name(now: DateTime<Utc>, token: &str, original: &str) -> String {
    format!(
        "{}_{}_{}",
        now.format("%Y%m%d_%H%M%S"),
        token,
        sanitize_file_name(original)
    )
}

/// Announced test time: `days_ahead` days after submission at `hour`:00 local time
///
/// Returns `None` when the offset or hour is out of range.
pub fn scheduled_test_time(
    submitted_at: DateTime<Utc>,
    days_ahead: i64,
    hour: u32,
    utc_offset_minutes: i32,
) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(utc_offset_minutes.checked_mul(60)?)?;
    let local_date = submitted_at.with_timezone(&offset).date_naive();
    let days = Days::new(u64::try_from(days_ahead).ok()?);
    let test_date = local_date.checked_add_days(days)?;
    let naive = test_date.and_hms_opt(hour, 0, 0)?;
    offset.from_local_datetime(&naive).single()
}

/// "04 March 2025 at 11:00 AM"
pub fn format_test_time(at: &DateTime<FixedOffset>) -> String {
    at.format("%d %B %Y at %I:%M %p").to_string()
}

/// Outcome of grading one submission
#[derive(Debug, Clone, PartialEq)]
pub struct GradedTest {
    pub questions: Vec<QuestionSnapshot>,
    pub score: i32,
    pub total: i32,
    pub percentage: f64,
}

/// Grade answers against the stored questions
///
/// The total is the number of answered question ids; a blank answer counts
/// as wrong. Every id must refer to a loaded question.
pub fn grade(
    questions: &[AptitudeQuestion],
    answers: &BTreeMap<i64, Option<String>>,
) -> RecruitmentResult<GradedTest> {
    if answers.is_empty() {
        return Err(RecruitmentError::validation(
            "answers",
            "Answer at least one question",
        ));
    }

    let mut snapshots = Vec::with_capacity(answers.len());
    let mut score = 0i32;
    for (id, selected) in answers {
        let question = questions
            .iter()
            .find(|q| q.id.as_i64() == *id)
            .ok_or_else(|| {
                RecruitmentError::validation("answers", format!("Unknown question id {id}"))
            })?;

        if selected.as_deref() == Some(question.correct_answer.as_str()) {
            score += 1;
        }
        snapshots.push(question.snapshot());
    }

    let total = i32::try_from(answers.len())
        .map_err(|_| RecruitmentError::validation("answers", "Too many answers"))?;
    let percentage = round_two_decimals(f64::from(score) * 100.0 / f64::from(total));

    Ok(GradedTest {
        questions: snapshots,
        score,
        total,
        percentage,
    })
}

fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
