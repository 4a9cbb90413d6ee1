//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::email::Email;
use kernel::id::QuestionId;
use platform::password::HashedPassword;

use crate::domain::entities::{
    Application, AptitudeQuestion, JobPosting, JobPostingDraft, NewApplication, NewQuestion,
    NewTestResult, TestResult,
};
use crate::error::RecruitmentResult;

/// Application repository trait
#[trait_variant::make(ApplicationRepository: Send)]
pub trait LocalApplicationRepository {
    /// Find an application by its (normalized) email
    async fn find_application_by_email(&self, email: &Email)
    -> RecruitmentResult<Option<Application>>;

    /// Insert the application and its aptitude credential atomically
    ///
    /// A concurrent insert of the same email fails with `DuplicateApplicant`.
    async fn insert_application_with_credential(
        &self,
        application: &NewApplication,
        credential: &HashedPassword,
    ) -> RecruitmentResult<Application>;

    /// All applications, newest first
    async fn list_applications(&self) -> RecruitmentResult<Vec<Application>>;
}

/// JobPosting repository trait
#[trait_variant::make(JobPostingRepository: Send)]
pub trait LocalJobPostingRepository {
    /// Create a posting; an existing (title, location) pair is a conflict
    async fn create_posting(&self, draft: &JobPostingDraft) -> RecruitmentResult<JobPosting>;

    /// Insert or update the description of the posting keyed by (title, location)
    async fn upsert_posting(&self, draft: &JobPostingDraft) -> RecruitmentResult<JobPosting>;

    /// All postings, newest first
    async fn list_postings(&self) -> RecruitmentResult<Vec<JobPosting>>;
}

/// Aptitude question and result repository trait
#[trait_variant::make(AptitudeRepository: Send)]
pub trait LocalAptitudeRepository {
    async fn create_question(&self, question: &NewQuestion) -> RecruitmentResult<AptitudeQuestion>;

    /// Questions newest first, optionally only the active ones
    async fn list_questions(&self, active_only: bool) -> RecruitmentResult<Vec<AptitudeQuestion>>;

    async fn find_questions_by_ids(
        &self,
        ids: &[QuestionId],
    ) -> RecruitmentResult<Vec<AptitudeQuestion>>;

    /// Returns `None` when the question does not exist
    async fn set_question_active(
        &self,
        id: QuestionId,
        is_active: bool,
    ) -> RecruitmentResult<Option<AptitudeQuestion>>;

    /// Returns `false` when the question does not exist
    async fn delete_question(&self, id: QuestionId) -> RecruitmentResult<bool>;

    async fn insert_result(&self, result: &NewTestResult) -> RecruitmentResult<TestResult>;

    /// All results, newest first
    async fn list_results(&self) -> RecruitmentResult<Vec<TestResult>>;
}
