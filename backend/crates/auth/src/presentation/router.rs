//! Auth Router

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use platform::password::PasswordHasher;
use platform::token::TokenSigner;

use crate::application::config::AuthConfig;
use crate::domain::repository::{AptitudeAccountRepository, StaffUserRepository};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{BearerAuthState, require_admin};

/// Create the Auth router for any repository implementation
///
/// Paths are relative to `/api`. `/admin-users` carries its own admin guard.
pub fn auth_router<R>(
    repo: Arc<R>,
    hasher: PasswordHasher,
    signer: TokenSigner,
    config: AuthConfig,
) -> Router
where
    R: AptitudeAccountRepository + StaffUserRepository + Send + Sync + 'static,
{
    let guard = BearerAuthState::new(signer.clone());
    let state = AuthAppState {
        repo,
        hasher,
        signer,
        config: Arc::new(config),
    };

    let admin = Router::new()
        .route(
            "/admin-users",
            get(handlers::list_staff_users::<R>).post(handlers::create_staff_user::<R>),
        )
        .route_layer(from_fn_with_state(guard, require_admin));

    Router::new()
        .route("/user-aptitude-login", post(handlers::applicant_login::<R>))
        .route("/admin-login", post(handlers::staff_login::<R>))
        .merge(admin)
        .with_state(state)
}
