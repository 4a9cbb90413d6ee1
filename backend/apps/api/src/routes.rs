//! Router composition
//!
//! Recruitment and auth routes under `/api` with bearer guards applied per
//! audience, plus liveness and résumé downloads at the root.

use std::path::Path;
use std::sync::Arc;

use auth::domain::repository::{AptitudeAccountRepository, StaffUserRepository};
use auth::{AuthConfig, BearerAuthState, auth_router, require_applicant, require_staff};
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::{Json, Router};
use platform::mail::Mailer;
use platform::password::PasswordHasher;
use platform::token::TokenSigner;
use recruitment::RecruitmentConfig;
use recruitment::domain::repository::{
    ApplicationRepository, AptitudeRepository, JobPostingRepository,
};
use recruitment::recruitment_routers;
use serde_json::{Value, json};
use tower_http::services::ServeDir;

/// Everything under `/api`
pub fn api_router<R, A, M>(
    recruitment_repo: Arc<R>,
    auth_repo: Arc<A>,
    mailer: Arc<M>,
    hasher: PasswordHasher,
    signer: TokenSigner,
    recruitment_config: RecruitmentConfig,
) -> Router
where
    R: ApplicationRepository + JobPostingRepository + AptitudeRepository + Send + Sync + 'static,
    A: AptitudeAccountRepository + StaffUserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let bearer = BearerAuthState::new(signer.clone());
    let recruitment =
        recruitment_routers(recruitment_repo, mailer, hasher.clone(), recruitment_config);

    Router::new()
        .merge(recruitment.public)
        .merge(
            recruitment
                .staff
                .route_layer(from_fn_with_state(bearer.clone(), require_staff)),
        )
        .merge(
            recruitment
                .applicant
                .route_layer(from_fn_with_state(bearer, require_applicant)),
        )
        .merge(auth_router(auth_repo, hasher, signer, AuthConfig::default()))
}

/// Mount the API next to `/health` and `/uploads`
pub fn app(api: Router, upload_dir: &Path) -> Router {
    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
        .nest_service("/uploads", ServeDir::new(upload_dir))
}

async fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "message": "Server is running"}))
}
