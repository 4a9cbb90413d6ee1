//! In-Memory Repository Implementation
//!
//! Backs the test suites in place of PostgreSQL. A single mutex guards all
//! tables, so the email check-and-insert is atomic like the unique constraint.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use kernel::email::Email;
use kernel::id::{ApplicationId, JobPostingId, QuestionId, TestResultId};
use platform::password::HashedPassword;

use crate::domain::entities::{
    Application, AptitudeQuestion, JobPosting, JobPostingDraft, NewApplication, NewQuestion,
    NewTestResult, TestResult,
};
use crate::domain::repository::{ApplicationRepository, AptitudeRepository, JobPostingRepository};
use crate::error::{RecruitmentError, RecruitmentResult};

#[derive(Default)]
struct State {
    next_id: i64,
    applications: Vec<Application>,
    credentials: HashMap<String, HashedPassword>,
    postings: Vec<JobPosting>,
    questions: Vec<AptitudeQuestion>,
    results: Vec<TestResult>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Mutex-guarded repository; clones share the same tables
#[derive(Clone, Default)]
pub struct InMemoryRecruitmentRepository {
    inner: Arc<Mutex<State>>,
}

impl InMemoryRecruitmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> RecruitmentResult<MutexGuard<'_, State>> {
        self.inner
            .lock()
            .map_err(|_| RecruitmentError::Internal("in-memory store lock poisoned".into()))
    }

    /// Stored aptitude credential for an applicant email
    pub fn credential_for(&self, email: &Email) -> Option<HashedPassword> {
        self.state()
            .ok()
            .and_then(|state| state.credentials.get(email.as_str()).cloned())
    }

    pub fn application_count(&self) -> usize {
        self.state().map(|state| state.applications.len()).unwrap_or(0)
    }

    pub fn credential_count(&self) -> usize {
        self.state().map(|state| state.credentials.len()).unwrap_or(0)
    }
}

impl ApplicationRepository for InMemoryRecruitmentRepository {
    async fn find_application_by_email(
        &self,
        email: &Email,
    ) -> RecruitmentResult<Option<Application>> {
        let state = self.state()?;
        Ok(state
            .applications
            .iter()
            .find(|application| application.email == *email)
            .cloned())
    }

    async fn insert_application_with_credential(
        &self,
        application: &NewApplication,
        credential: &HashedPassword,
    ) -> RecruitmentResult<Application> {
        let mut state = self.state()?;
        let email = application.email.as_str();
        if state.credentials.contains_key(email)
            || state.applications.iter().any(|a| a.email == application.email)
        {
            return Err(RecruitmentError::DuplicateApplicant);
        }

        let id = ApplicationId::from_i64(state.next_id());
        let stored = application.clone().into_application(id, Utc::now());
        state.applications.push(stored.clone());
        state.credentials.insert(email.to_string(), credential.clone());
        Ok(stored)
    }

    async fn list_applications(&self) -> RecruitmentResult<Vec<Application>> {
        let state = self.state()?;
        Ok(state.applications.iter().rev().cloned().collect())
    }
}

impl JobPostingRepository for InMemoryRecruitmentRepository {
    async fn create_posting(&self, draft: &JobPostingDraft) -> RecruitmentResult<JobPosting> {
        let mut state = self.state()?;
        if state
            .postings
            .iter()
            .any(|p| p.title == draft.title && p.location == draft.location)
        {
            return Err(RecruitmentError::Conflict(
                "A job posting with this title and location already exists".into(),
            ));
        }

        let now = Utc::now();
        let posting = JobPosting {
            id: JobPostingId::from_i64(state.next_id()),
            title: draft.title.clone(),
            description: draft.description.clone(),
            location: draft.location.clone(),
            created_at: now,
            updated_at: now,
        };
        state.postings.push(posting.clone());
        Ok(posting)
    }

    async fn upsert_posting(&self, draft: &JobPostingDraft) -> RecruitmentResult<JobPosting> {
        let mut state = self.state()?;
        if let Some(existing) = state
            .postings
            .iter_mut()
            .find(|p| p.title == draft.title && p.location == draft.location)
        {
            if existing.description != draft.description {
                existing.description = draft.description.clone();
                existing.updated_at = Utc::now();
            }
            return Ok(existing.clone());
        }

        let now = Utc::now();
        let posting = JobPosting {
            id: JobPostingId::from_i64(state.next_id()),
            title: draft.title.clone(),
            description: draft.description.clone(),
            location: draft.location.clone(),
            created_at: now,
            updated_at: now,
        };
        state.postings.push(posting.clone());
        Ok(posting)
    }

    async fn list_postings(&self) -> RecruitmentResult<Vec<JobPosting>> {
        let state = self.state()?;
        Ok(state.postings.iter().rev().cloned().collect())
    }
}

impl AptitudeRepository for InMemoryRecruitmentRepository {
    async fn create_question(&self, question: &NewQuestion) -> RecruitmentResult<AptitudeQuestion> {
        let mut state = self.state()?;
        let stored = AptitudeQuestion {
            id: QuestionId::from_i64(state.next_id()),
            question: question.question.clone(),
            options: question.options.clone(),
            correct_answer: question.correct_answer.clone(),
            category: question.category.clone(),
            difficulty: question.difficulty,
            is_active: true,
            created_at: Utc::now(),
        };
        state.questions.push(stored.clone());
        Ok(stored)
    }

    async fn list_questions(&self, active_only: bool) -> RecruitmentResult<Vec<AptitudeQuestion>> {
        let state = self.state()?;
        Ok(state
            .questions
            .iter()
            .rev()
            .filter(|q| q.is_active || !active_only)
            .cloned()
            .collect())
    }

    async fn find_questions_by_ids(
        &self,
        ids: &[QuestionId],
    ) -> RecruitmentResult<Vec<AptitudeQuestion>> {
        let state = self.state()?;
        Ok(state
            .questions
            .iter()
            .filter(|q| ids.contains(&q.id))
            .cloned()
            .collect())
    }

    async fn set_question_active(
        &self,
        id: QuestionId,
        is_active: bool,
    ) -> RecruitmentResult<Option<AptitudeQuestion>> {
        let mut state = self.state()?;
        Ok(state.questions.iter_mut().find(|q| q.id == id).map(|q| {
            q.is_active = is_active;
            q.clone()
        }))
    }

    async fn delete_question(&self, id: QuestionId) -> RecruitmentResult<bool> {
        let mut state = self.state()?;
        let before = state.questions.len();
        state.questions.retain(|q| q.id != id);
        Ok(state.questions.len() < before)
    }

    async fn insert_result(&self, result: &NewTestResult) -> RecruitmentResult<TestResult> {
        let mut state = self.state()?;
        let stored = TestResult {
            id: TestResultId::from_i64(state.next_id()),
            email: result.email.clone(),
            questions: result.questions.clone(),
            answers: result.answers.clone(),
            score: result.score,
            total: result.total,
            percentage: result.percentage,
            elapsed_seconds: result.elapsed_seconds,
            created_at: Utc::now(),
        };
        state.results.push(stored.clone());
        Ok(stored)
    }

    async fn list_results(&self) -> RecruitmentResult<Vec<TestResult>> {
        let state = self.state()?;
        Ok(state.results.iter().rev().cloned().collect())
    }
}
