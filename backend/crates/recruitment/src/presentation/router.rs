//! Recruitment Router

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
};
use platform::mail::Mailer;
use platform::password::PasswordHasher;

use crate::application::config::RecruitmentConfig;
use crate::domain::repository::{ApplicationRepository, AptitudeRepository, JobPostingRepository};
use crate::infra::resume_store::ResumeStore;
use crate::notification::dispatcher::NotificationDispatcher;
use crate::presentation::handlers::{self, RecruitmentAppState};

/// Routes grouped by who may call them
///
/// The caller layers the bearer-token guards onto `staff` and `applicant`
/// before merging; paths are relative to `/api`.
pub struct RecruitmentRouters {
    pub public: Router,
    pub staff: Router,
    pub applicant: Router,
}

/// Create the recruitment routers for any repository and mailer
pub fn recruitment_routers<R, M>(
    repo: Arc<R>,
    mailer: Arc<M>,
    hasher: PasswordHasher,
    config: RecruitmentConfig,
) -> RecruitmentRouters
where
    R: ApplicationRepository + JobPostingRepository + AptitudeRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let resumes = ResumeStore::new(config.upload_dir.clone());
    let max_form_bytes = config.max_form_bytes();
    let dispatcher = NotificationDispatcher::new(
        mailer,
        Arc::new(config.notification.clone()),
        resumes.clone(),
    );

    let state = RecruitmentAppState {
        repo,
        dispatcher,
        resumes,
        hasher,
        config: Arc::new(config),
    };

    let public = Router::new()
        .route(
            "/applicationform",
            post(handlers::submit_application::<R, M>).layer(DefaultBodyLimit::max(max_form_bytes)),
        )
        .route("/jobpositions", get(handlers::list_job_postings::<R, M>))
        .with_state(state.clone());

    let staff = Router::new()
        .route("/applicationforms", get(handlers::list_applications::<R, M>))
        .route("/jobpositions", post(handlers::create_job_posting::<R, M>))
        .route("/jobpositions/sync", post(handlers::sync_job_postings::<R, M>))
        .route(
            "/aptitude/admin/questions",
            get(handlers::list_questions::<R, M>).post(handlers::create_question::<R, M>),
        )
        .route(
            "/aptitude/admin/questions/{id}",
            patch(handlers::set_question_active::<R, M>).delete(handlers::delete_question::<R, M>),
        )
        .route("/aptitude/admin/results", get(handlers::list_results::<R, M>))
        .with_state(state.clone());

    let applicant = Router::new()
        .route("/aptitude/questions", get(handlers::list_active_questions::<R, M>))
        .route("/aptitude/results", post(handlers::submit_test::<R, M>))
        .with_state(state);

    RecruitmentRouters {
        public,
        staff,
        applicant,
    }
}
