//! Domain Entities
//!
//! Core business entities for the recruitment domain.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use kernel::email::Email;
use kernel::id::{ApplicationId, JobPostingId, QuestionId, TestResultId};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Cgpa, Difficulty, MobileNumber};

/// Application entity - one submitted job application
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub id: ApplicationId,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub mobile: MobileNumber,
    pub email: Email,
    pub graduation: String,
    pub cgpa: Cgpa,
    pub position: String,
    /// Stored file name under the upload directory
    pub resume_file: String,
    pub created_at: DateTime<Utc>,
}

impl Application {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A validated application not yet assigned an id
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub mobile: MobileNumber,
    pub email: Email,
    pub graduation: String,
    pub cgpa: Cgpa,
    pub position: String,
    pub resume_file: String,
}

impl NewApplication {
    /// Attach the identity assigned by the store
    pub fn into_application(self, id: ApplicationId, created_at: DateTime<Utc>) -> Application {
        Application {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            address: self.address,
            mobile: self.mobile,
            email: self.email,
            graduation: self.graduation,
            cgpa: self.cgpa,
            position: self.position,
            resume_file: self.resume_file,
            created_at,
        }
    }
}

/// JobPosting entity
#[derive(Debug, Clone, PartialEq)]
pub struct JobPosting {
    pub id: JobPostingId,
    pub title: String,
    pub description: Option<String>,
    /// Empty string when the posting has no location
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or upserting a posting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPostingDraft {
    pub title: String,
    pub description: Option<String>,
    pub location: String,
}

/// AptitudeQuestion entity
#[derive(Debug, Clone, PartialEq)]
pub struct AptitudeQuestion {
    pub id: QuestionId,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl AptitudeQuestion {
    pub fn snapshot(&self) -> QuestionSnapshot {
        QuestionSnapshot {
            id: self.id.as_i64(),
            question: self.question.clone(),
            options: self.options.clone(),
            correct_answer: self.correct_answer.clone(),
        }
    }
}

/// A validated question not yet assigned an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub category: String,
    pub difficulty: Difficulty,
}

/// Question as presented to the applicant, frozen into the result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSnapshot {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// TestResult entity
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    pub id: TestResultId,
    pub email: Email,
    pub questions: Vec<QuestionSnapshot>,
    /// Selected option per question id; `None` when left blank
    pub answers: BTreeMap<i64, Option<String>>,
    pub score: i32,
    pub total: i32,
    pub percentage: f64,
    pub elapsed_seconds: i32,
    pub created_at: DateTime<Utc>,
}

/// A graded result not yet assigned an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewTestResult {
    pub email: Email,
    pub questions: Vec<QuestionSnapshot>,
    pub answers: BTreeMap<i64, Option<String>>,
    pub score: i32,
    pub total: i32,
    pub percentage: f64,
    pub elapsed_seconds: i32,
}
