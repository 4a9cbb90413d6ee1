//! API DTOs (Data Transfer Objects)

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::submit_application::ApplicationReceipt;
use crate::domain::entities::{
    Application, AptitudeQuestion, JobPosting, QuestionSnapshot, TestResult,
};
use crate::domain::value_objects::Difficulty;

pub const SUBMITTED_MESSAGE: &str = "Application submitted successfully. Emails are being sent.";

// ============================================================================
// Applications
// ============================================================================

/// Response for POST /api/applicationform
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplicationResponse {
    pub message: &'static str,
    pub saved_application: SavedApplicationDto,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedApplicationDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: String,
}

impl From<ApplicationReceipt> for SubmitApplicationResponse {
    fn from(receipt: ApplicationReceipt) -> Self {
        Self {
            message: SUBMITTED_MESSAGE,
            saved_application: SavedApplicationDto {
                id: receipt.id.as_i64(),
                first_name: receipt.first_name,
                last_name: receipt.last_name,
                email: receipt.email.into_db(),
                position: receipt.position,
            },
        }
    }
}

/// Response for GET /api/applicationforms
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationListResponse {
    pub applications: Vec<ApplicationDto>,
}

/// One stored application, column-shaped
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub mobile: String,
    pub email: String,
    pub graduation: String,
    pub cgpa: f64,
    pub position: String,
    pub resume_file: String,
    /// Download path served by the API
    pub resume_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<Application> for ApplicationDto {
    fn from(application: Application) -> Self {
        Self {
            id: application.id.as_i64(),
            resume_url: format!("/uploads/{}", application.resume_file),
            first_name: application.first_name,
            last_name: application.last_name,
            address: application.address,
            mobile: application.mobile.as_str().to_string(),
            email: application.email.into_db(),
            graduation: application.graduation,
            cgpa: application.cgpa.value(),
            position: application.position,
            resume_file: application.resume_file,
            created_at: application.created_at,
        }
    }
}

// ============================================================================
// Job postings
// ============================================================================

/// Request for POST /api/jobpositions
#[derive(Debug, Clone, Deserialize)]
pub struct CreateJobPostingRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// One entry of POST /api/jobpositions/sync
#[derive(Debug, Clone, Deserialize)]
pub struct SyncJobPostingEntry {
    pub title: String,
    #[serde(default, alias = "description")]
    pub details: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobPostingDto {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<JobPosting> for JobPostingDto {
    fn from(posting: JobPosting) -> Self {
        Self {
            id: posting.id.as_i64(),
            title: posting.title,
            description: posting.description,
            location: Some(posting.location).filter(|l| !l.is_empty()),
            created_at: posting.created_at,
            updated_at: posting.updated_at,
        }
    }
}

/// Response for GET /api/jobpositions and POST /api/jobpositions/sync
#[derive(Debug, Clone, Serialize)]
pub struct JobPostingListResponse {
    pub positions: Vec<JobPostingDto>,
}

impl From<Vec<JobPosting>> for JobPostingListResponse {
    fn from(postings: Vec<JobPosting>) -> Self {
        Self {
            positions: postings.into_iter().map(JobPostingDto::from).collect(),
        }
    }
}

// ============================================================================
// Aptitude questions
// ============================================================================

/// Request for POST /api/aptitude/admin/questions
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

/// Request for PATCH /api/aptitude/admin/questions/{id}
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetQuestionActiveRequest {
    pub is_active: bool,
}

/// Question with its answer, for staff
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<AptitudeQuestion> for QuestionDto {
    fn from(question: AptitudeQuestion) -> Self {
        Self {
            id: question.id.as_i64(),
            question: question.question,
            options: question.options,
            correct_answer: question.correct_answer,
            category: question.category,
            difficulty: question.difficulty,
            is_active: question.is_active,
            created_at: question.created_at,
        }
    }
}

/// Question as shown to an applicant; no correct answer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestionDto {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub category: String,
    pub difficulty: Difficulty,
}

impl From<AptitudeQuestion> for PublicQuestionDto {
    fn from(question: AptitudeQuestion) -> Self {
        Self {
            id: question.id.as_i64(),
            question: question.question,
            options: question.options,
            category: question.category,
            difficulty: question.difficulty,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionListResponse<T> {
    pub questions: Vec<T>,
}

// ============================================================================
// Test results
// ============================================================================

/// Request for POST /api/aptitude/results
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTestRequest {
    /// Question id → selected option
    pub answers: BTreeMap<i64, Option<String>>,
    #[serde(default)]
    pub elapsed_seconds: i64,
}

/// Score returned to the applicant
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestScoreDto {
    pub id: i64,
    pub score: i32,
    pub total: i32,
    pub percentage: f64,
    pub elapsed_seconds: i32,
    pub created_at: DateTime<Utc>,
}

impl From<TestResult> for TestScoreDto {
    fn from(result: TestResult) -> Self {
        Self {
            id: result.id.as_i64(),
            score: result.score,
            total: result.total,
            percentage: result.percentage,
            elapsed_seconds: result.elapsed_seconds,
            created_at: result.created_at,
        }
    }
}

/// Full result with snapshot and answers, for staff
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultDto {
    pub id: i64,
    pub email: String,
    pub questions: Vec<QuestionSnapshot>,
    pub answers: BTreeMap<i64, Option<String>>,
    pub score: i32,
    pub total: i32,
    pub percentage: f64,
    pub elapsed_seconds: i32,
    pub created_at: DateTime<Utc>,
}

impl From<TestResult> for TestResultDto {
    fn from(result: TestResult) -> Self {
        Self {
            id: result.id.as_i64(),
            email: result.email.into_db(),
            questions: result.questions,
            answers: result.answers,
            score: result.score,
            total: result.total,
            percentage: result.percentage,
            elapsed_seconds: result.elapsed_seconds,
            created_at: result.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TestResultListResponse {
    pub results: Vec<TestResultDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_test_request_accepts_string_keys() {
        let request: SubmitTestRequest =
            serde_json::from_str(r#"{"answers": {"3": "B", "7": null}, "elapsedSeconds": 95}"#)
                .unwrap();
        assert_eq!(request.answers.get(&3), Some(&Some("B".to_string())));
        assert_eq!(request.answers.get(&7), Some(&None));
        assert_eq!(request.elapsed_seconds, 95);
    }

    #[test]
    fn test_sync_entry_reads_details() {
        let raw = r#"[{"title": "Engineer", "details": "Rust", "location": "Pune"}]"#;
        let entries: Vec<SyncJobPostingEntry> = serde_json::from_str(raw).unwrap();
        assert_eq!(entries[0].details.as_deref(), Some("Rust"));
    }
}
