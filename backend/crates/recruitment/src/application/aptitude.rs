//! Aptitude Question Use Cases
//!
//! Staff manage the question bank; applicants only ever see active questions
//! without their answers.

use std::collections::HashSet;
use std::sync::Arc;

use kernel::id::QuestionId;

use crate::domain::entities::{AptitudeQuestion, NewQuestion};
use crate::domain::repository::AptitudeRepository;
use crate::domain::value_objects::Difficulty;
use crate::error::{RecruitmentError, RecruitmentResult};

const DEFAULT_CATEGORY: &str = "general";

/// Input DTO for create question
#[derive(Debug, Clone, Default)]
pub struct CreateQuestionInput {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub category: Option<String>,
    pub difficulty: Option<String>,
}

impl CreateQuestionInput {
    fn into_new_question(self) -> RecruitmentResult<NewQuestion> {
        let question = self.question.trim().to_string();
        if question.is_empty() {
            return Err(RecruitmentError::validation("question", "Question text is required"));
        }

        let options: Vec<String> = self.options.iter().map(|o| o.trim().to_string()).collect();
        if options.iter().any(String::is_empty) {
            return Err(RecruitmentError::validation("options", "Options must not be blank"));
        }
        let distinct: HashSet<&str> = options.iter().map(String::as_str).collect();
        if distinct.len() != options.len() {
            return Err(RecruitmentError::validation("options", "Options must be distinct"));
        }
        if options.len() < 2 {
            return Err(RecruitmentError::validation(
                "options",
                "Provide at least two options",
            ));
        }

        let correct_answer = self.correct_answer.trim().to_string();
        if !options.contains(&correct_answer) {
            return Err(RecruitmentError::validation(
                "correctAnswer",
                "Correct answer must be one of the options",
            ));
        }

        let category = self
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        let difficulty = match self.difficulty.as_deref() {
            None => Difficulty::default(),
            Some(code) => Difficulty::from_code(code).ok_or_else(|| {
                RecruitmentError::validation(
                    "difficulty",
                    "Difficulty must be easy, medium or hard",
                )
            })?,
        };

        Ok(NewQuestion {
            question,
            options,
            correct_answer,
            category,
            difficulty,
        })
    }
}

/// Create Question Use Case
pub struct CreateQuestionUseCase<R>
where
    R: AptitudeRepository,
{
    repo: Arc<R>,
}

impl<R> CreateQuestionUseCase<R>
where
    R: AptitudeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: CreateQuestionInput) -> RecruitmentResult<AptitudeQuestion> {
        let new_question = input.into_new_question()?;
        let question = self.repo.create_question(&new_question).await?;

        tracing::info!(
            question_id = question.id.as_i64(),
            category = %question.category,
            difficulty = %question.difficulty,
            "Aptitude question created"
        );

        Ok(question)
    }
}

/// List Questions Use Case
pub struct ListQuestionsUseCase<R>
where
    R: AptitudeRepository,
{
    repo: Arc<R>,
}

impl<R> ListQuestionsUseCase<R>
where
    R: AptitudeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Every question, for staff
    pub async fn all(&self) -> RecruitmentResult<Vec<AptitudeQuestion>> {
        self.repo.list_questions(false).await
    }

    /// Active questions, for applicants; callers strip the answers
    pub async fn active(&self) -> RecruitmentResult<Vec<AptitudeQuestion>> {
        self.repo.list_questions(true).await
    }
}

/// Set Question Active / Delete Question Use Case
pub struct ManageQuestionUseCase<R>
where
    R: AptitudeRepository,
{
    repo: Arc<R>,
}

impl<R> ManageQuestionUseCase<R>
where
    R: AptitudeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn set_active(
        &self,
        id: QuestionId,
        is_active: bool,
    ) -> RecruitmentResult<AptitudeQuestion> {
        let question = self
            .repo
            .set_question_active(id, is_active)
            .await?
            .ok_or_else(|| question_not_found(id))?;

        tracing::info!(question_id = id.as_i64(), is_active, "Aptitude question updated");
        Ok(question)
    }

    pub async fn delete(&self, id: QuestionId) -> RecruitmentResult<()> {
        if !self.repo.delete_question(id).await? {
            return Err(question_not_found(id));
        }

        tracing::info!(question_id = id.as_i64(), "Aptitude question deleted");
        Ok(())
    }
}

fn question_not_found(id: QuestionId) -> RecruitmentError {
    RecruitmentError::NotFound(format!("Question {id} not found"))
}
