//! Staff Login Use Case
//!
//! Admin and HR login. The claimed role only selects which row to look up;
//! the token carries the role stored on that row.

use std::sync::Arc;

use chrono::Utc;
use kernel::email::Email;
use kernel::principal::StaffRole;
use platform::password::{ClearTextPassword, PasswordHasher};
use platform::token::TokenSigner;

use crate::application::config::AuthConfig;
use crate::application::credentials::verify_password;
use crate::domain::entity::StaffUser;
use crate::domain::repository::StaffUserRepository;
use crate::domain::value_object::TokenClaims;
use crate::error::{AuthError, AuthResult};

/// Staff login input
pub struct StaffLoginInput {
    pub email: String,
    pub password: String,
    /// Role selected on the login form
    pub role: String,
}

/// Staff login output
#[derive(Debug)]
pub struct StaffLoginOutput {
    pub token: String,
    pub user: StaffUser,
}

/// Staff login use case
pub struct StaffLoginUseCase<R>
where
    R: StaffUserRepository,
{
    repo: Arc<R>,
    hasher: PasswordHasher,
    signer: TokenSigner,
    config: Arc<AuthConfig>,
}

impl<R> StaffLoginUseCase<R>
where
    R: StaffUserRepository,
{
    pub fn new(
        repo: Arc<R>,
        hasher: PasswordHasher,
        signer: TokenSigner,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            repo,
            hasher,
            signer,
            config,
        }
    }

    pub async fn execute(&self, input: StaffLoginInput) -> AuthResult<StaffLoginOutput> {
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let role = StaffRole::from_code(&input.role).ok_or(AuthError::InvalidCredentials)?;

        let user = self
            .repo
            .find_active_staff(&email, role)
            .await?
            .filter(StaffUser::can_login)
            .ok_or(AuthError::InvalidCredentials)?;

        let password = ClearTextPassword::for_verification(input.password);
        if !verify_password(&self.hasher, password, user.password_hash.clone()).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let claims =
            TokenClaims::for_staff(&user, Utc::now().timestamp(), self.config.staff_ttl_secs());
        let token = self.signer.issue(&claims)?;

        tracing::info!(
            staff_user_id = user.id.as_i64(),
            role = %user.role,
            "Staff user logged in"
        );

        Ok(StaffLoginOutput { token, user })
    }
}
