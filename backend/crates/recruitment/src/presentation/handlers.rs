//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum_extra::extract::WithRejection;
use kernel::id::QuestionId;
use kernel::principal::Principal;
use platform::mail::Mailer;
use platform::password::PasswordHasher;

use crate::application::aptitude::{
    CreateQuestionInput, CreateQuestionUseCase, ListQuestionsUseCase, ManageQuestionUseCase,
};
use crate::application::config::RecruitmentConfig;
use crate::application::grade_test::{ListTestResultsUseCase, SubmitTestInput, SubmitTestUseCase};
use crate::application::job_postings::{
    CreateJobPostingUseCase, JobPostingInput, ListJobPostingsUseCase, SyncJobPostingsUseCase,
};
use crate::application::list_applications::ListApplicationsUseCase;
use crate::application::submit_application::{
    ResumeUpload, SubmitApplicationInput, SubmitApplicationUseCase,
};
use crate::domain::repository::{ApplicationRepository, AptitudeRepository, JobPostingRepository};
use crate::error::{RecruitmentError, RecruitmentResult};
use crate::infra::resume_store::ResumeStore;
use crate::notification::dispatcher::NotificationDispatcher;
use crate::presentation::dto::{
    ApplicationDto, ApplicationListResponse, CreateJobPostingRequest, CreateQuestionRequest,
    JobPostingDto, JobPostingListResponse, PublicQuestionDto, QuestionDto, QuestionListResponse,
    SetQuestionActiveRequest, SubmitApplicationResponse, SubmitTestRequest, SyncJobPostingEntry,
    TestResultDto, TestResultListResponse, TestScoreDto,
};

/// Shared state for recruitment handlers
pub struct RecruitmentAppState<R, M> {
    pub repo: Arc<R>,
    pub dispatcher: NotificationDispatcher<M>,
    pub resumes: ResumeStore,
    pub hasher: PasswordHasher,
    pub config: Arc<RecruitmentConfig>,
}

impl<R, M> Clone for RecruitmentAppState<R, M> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            dispatcher: self.dispatcher.clone(),
            resumes: self.resumes.clone(),
            hasher: self.hasher.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Applications
// ============================================================================

/// POST /api/applicationform
pub async fn submit_application<R, M>(
    State(state): State<RecruitmentAppState<R, M>>,
    WithRejection(multipart, _): WithRejection<Multipart, RecruitmentError>,
) -> RecruitmentResult<Json<SubmitApplicationResponse>>
where
    R: ApplicationRepository + JobPostingRepository + AptitudeRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let input = read_application_form(multipart).await?;

    let use_case = SubmitApplicationUseCase::new(
        state.repo.clone(),
        state.resumes.clone(),
        state.dispatcher.clone(),
        state.hasher.clone(),
        state.config.clone(),
    );

    // Notification handles are dropped; the tasks keep running detached
    let output = use_case.execute(input).await?;

    Ok(Json(output.receipt.into()))
}

/// Collect the multipart form; unknown fields are ignored
async fn read_application_form(
    mut multipart: Multipart,
) -> RecruitmentResult<SubmitApplicationInput> {
    let mut input = SubmitApplicationInput::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                input.resume = Some(ResumeUpload {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            "firstName" => input.first_name = field.text().await?,
            "lastName" => input.last_name = field.text().await?,
            "address" => input.address = field.text().await?,
            "mobile" => input.mobile = field.text().await?,
            "email" => input.email = field.text().await?,
            "graduation" => input.graduation = field.text().await?,
            "cgpa" => input.cgpa = field.text().await?,
            "position" => input.position = field.text().await?,
            other => {
                tracing::debug!(field = %other, "Ignoring unknown form field");
            }
        }
    }

    Ok(input)
}

/// GET /api/applicationforms
pub async fn list_applications<R, M>(
    State(state): State<RecruitmentAppState<R, M>>,
) -> RecruitmentResult<Json<ApplicationListResponse>>
where
    R: ApplicationRepository + JobPostingRepository + AptitudeRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let applications = ListApplicationsUseCase::new(state.repo.clone()).execute().await?;

    Ok(Json(ApplicationListResponse {
        applications: applications.into_iter().map(ApplicationDto::from).collect(),
    }))
}

// ============================================================================
// Job postings
// ============================================================================

/// GET /api/jobpositions
pub async fn list_job_postings<R, M>(
    State(state): State<RecruitmentAppState<R, M>>,
) -> RecruitmentResult<Json<JobPostingListResponse>>
where
    R: ApplicationRepository + JobPostingRepository + AptitudeRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let postings = ListJobPostingsUseCase::new(state.repo.clone()).execute().await?;
    Ok(Json(postings.into()))
}

/// POST /api/jobpositions
pub async fn create_job_posting<R, M>(
    State(state): State<RecruitmentAppState<R, M>>,
    WithRejection(Json(req), _): WithRejection<Json<CreateJobPostingRequest>, RecruitmentError>,
) -> RecruitmentResult<Json<JobPostingDto>>
where
    R: ApplicationRepository + JobPostingRepository + AptitudeRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let posting = CreateJobPostingUseCase::new(state.repo.clone())
        .execute(JobPostingInput {
            title: req.title,
            description: req.description,
            location: req.location,
        })
        .await?;

    Ok(Json(posting.into()))
}

/// POST /api/jobpositions/sync
pub async fn sync_job_postings<R, M>(
    State(state): State<RecruitmentAppState<R, M>>,
    WithRejection(Json(entries), _): WithRejection<
        Json<Vec<SyncJobPostingEntry>>,
        RecruitmentError,
    >,
) -> RecruitmentResult<Json<JobPostingListResponse>>
where
    R: ApplicationRepository + JobPostingRepository + AptitudeRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let inputs = entries
        .into_iter()
        .map(|entry| JobPostingInput {
            title: entry.title,
            description: entry.details,
            location: entry.location,
        })
        .collect();

    let postings = SyncJobPostingsUseCase::new(state.repo.clone())
        .execute(inputs)
        .await?;

    Ok(Json(postings.into()))
}

// ============================================================================
// Aptitude (applicant)
// ============================================================================

/// GET /api/aptitude/questions
pub async fn list_active_questions<R, M>(
    State(state): State<RecruitmentAppState<R, M>>,
) -> RecruitmentResult<Json<QuestionListResponse<PublicQuestionDto>>>
where
    R: ApplicationRepository + JobPostingRepository + AptitudeRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let questions = ListQuestionsUseCase::new(state.repo.clone()).active().await?;

    Ok(Json(QuestionListResponse {
        questions: questions.into_iter().map(PublicQuestionDto::from).collect(),
    }))
}

/// POST /api/aptitude/results
pub async fn submit_test<R, M>(
    State(state): State<RecruitmentAppState<R, M>>,
    axum::Extension(principal): axum::Extension<Principal>,
    WithRejection(Json(req), _): WithRejection<Json<SubmitTestRequest>, RecruitmentError>,
) -> RecruitmentResult<Json<TestScoreDto>>
where
    R: ApplicationRepository + JobPostingRepository + AptitudeRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let result = SubmitTestUseCase::new(state.repo.clone())
        .execute(SubmitTestInput {
            email: principal.email().clone(),
            answers: req.answers,
            elapsed_seconds: req.elapsed_seconds,
        })
        .await?;

    Ok(Json(result.into()))
}

// ============================================================================
// Aptitude (staff)
// ============================================================================

/// GET /api/aptitude/admin/questions
pub async fn list_questions<R, M>(
    State(state): State<RecruitmentAppState<R, M>>,
) -> RecruitmentResult<Json<QuestionListResponse<QuestionDto>>>
where
    R: ApplicationRepository + JobPostingRepository + AptitudeRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let questions = ListQuestionsUseCase::new(state.repo.clone()).all().await?;

    Ok(Json(QuestionListResponse {
        questions: questions.into_iter().map(QuestionDto::from).collect(),
    }))
}

/// POST /api/aptitude/admin/questions
pub async fn create_question<R, M>(
    State(state): State<RecruitmentAppState<R, M>>,
    WithRejection(Json(req), _): WithRejection<Json<CreateQuestionRequest>, RecruitmentError>,
) -> RecruitmentResult<Json<QuestionDto>>
where
    R: ApplicationRepository + JobPostingRepository + AptitudeRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let question = CreateQuestionUseCase::new(state.repo.clone())
        .execute(CreateQuestionInput {
            question: req.question,
            options: req.options,
            correct_answer: req.correct_answer,
            category: req.category,
            difficulty: req.difficulty,
        })
        .await?;

    Ok(Json(question.into()))
}

/// PATCH /api/aptitude/admin/questions/{id}
pub async fn set_question_active<R, M>(
    State(state): State<RecruitmentAppState<R, M>>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, RecruitmentError>,
    WithRejection(Json(req), _): WithRejection<Json<SetQuestionActiveRequest>, RecruitmentError>,
) -> RecruitmentResult<Json<QuestionDto>>
where
    R: ApplicationRepository + JobPostingRepository + AptitudeRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let question = ManageQuestionUseCase::new(state.repo.clone())
        .set_active(QuestionId::from_i64(id), req.is_active)
        .await?;

    Ok(Json(question.into()))
}

/// DELETE /api/aptitude/admin/questions/{id}
pub async fn delete_question<R, M>(
    State(state): State<RecruitmentAppState<R, M>>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, RecruitmentError>,
) -> RecruitmentResult<StatusCode>
where
    R: ApplicationRepository + JobPostingRepository + AptitudeRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    ManageQuestionUseCase::new(state.repo.clone())
        .delete(QuestionId::from_i64(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/aptitude/admin/results
pub async fn list_results<R, M>(
    State(state): State<RecruitmentAppState<R, M>>,
) -> RecruitmentResult<Json<TestResultListResponse>>
where
    R: ApplicationRepository + JobPostingRepository + AptitudeRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let results = ListTestResultsUseCase::new(state.repo.clone()).execute().await?;

    Ok(Json(TestResultListResponse {
        results: results.into_iter().map(TestResultDto::from).collect(),
    }))
}
