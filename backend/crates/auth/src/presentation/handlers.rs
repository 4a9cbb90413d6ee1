//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum_extra::extract::WithRejection;
use platform::password::PasswordHasher;
use platform::token::TokenSigner;

use crate::application::config::AuthConfig;
use crate::application::{
    ApplicantLoginInput, ApplicantLoginUseCase, CreateStaffUserInput, CreateStaffUserUseCase,
    ListStaffUsersUseCase, StaffLoginInput, StaffLoginUseCase,
};
use crate::domain::repository::{AptitudeAccountRepository, StaffUserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ApplicantLoginRequest, ApplicantLoginResponse, CreateStaffUserRequest, StaffLoginRequest,
    StaffLoginResponse, StaffUserDto, StaffUserListResponse,
};

/// Shared state for auth handlers
pub struct AuthAppState<R> {
    pub repo: Arc<R>,
    pub hasher: PasswordHasher,
    pub signer: TokenSigner,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for AuthAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            hasher: self.hasher.clone(),
            signer: self.signer.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/user-aptitude-login
pub async fn applicant_login<R>(
    State(state): State<AuthAppState<R>>,
    WithRejection(Json(req), _): WithRejection<Json<ApplicantLoginRequest>, AuthError>,
) -> AuthResult<Json<ApplicantLoginResponse>>
where
    R: AptitudeAccountRepository + StaffUserRepository + Send + Sync + 'static,
{
    let use_case = ApplicantLoginUseCase::new(
        state.repo.clone(),
        state.hasher.clone(),
        state.signer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(ApplicantLoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(ApplicantLoginResponse {
        success: true,
        auth_token: output.token,
    }))
}

/// POST /api/admin-login
pub async fn staff_login<R>(
    State(state): State<AuthAppState<R>>,
    WithRejection(Json(req), _): WithRejection<Json<StaffLoginRequest>, AuthError>,
) -> AuthResult<Json<StaffLoginResponse>>
where
    R: AptitudeAccountRepository + StaffUserRepository + Send + Sync + 'static,
{
    let use_case = StaffLoginUseCase::new(
        state.repo.clone(),
        state.hasher.clone(),
        state.signer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(StaffLoginInput {
            email: req.email,
            password: req.password,
            role: req.role,
        })
        .await?;

    Ok(Json(StaffLoginResponse {
        access_token: output.token,
        token_type: "bearer",
        role: output.user.role,
        email: output.user.email.into_db(),
        full_name: output.user.full_name,
    }))
}

// ============================================================================
// Staff users (admin only, guarded by `require_admin`)
// ============================================================================

/// GET /api/admin-users
pub async fn list_staff_users<R>(
    State(state): State<AuthAppState<R>>,
) -> AuthResult<Json<StaffUserListResponse>>
where
    R: AptitudeAccountRepository + StaffUserRepository + Send + Sync + 'static,
{
    let users = ListStaffUsersUseCase::new(state.repo.clone()).execute().await?;

    Ok(Json(StaffUserListResponse {
        users: users.into_iter().map(StaffUserDto::from).collect(),
    }))
}

/// POST /api/admin-users
pub async fn create_staff_user<R>(
    State(state): State<AuthAppState<R>>,
    WithRejection(Json(req), _): WithRejection<Json<CreateStaffUserRequest>, AuthError>,
) -> AuthResult<Json<StaffUserDto>>
where
    R: AptitudeAccountRepository + StaffUserRepository + Send + Sync + 'static,
{
    let user = CreateStaffUserUseCase::new(state.repo.clone(), state.hasher.clone())
        .execute(CreateStaffUserInput {
            email: req.email,
            password: req.password,
            role: req.role,
            full_name: req.full_name,
        })
        .await?;

    Ok(Json(user.into()))
}
