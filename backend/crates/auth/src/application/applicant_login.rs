//! Applicant Login Use Case
//!
//! Exchanges the one-time password from the invitation email for a 24h
//! aptitude token.

use std::sync::Arc;

use chrono::Utc;
use kernel::email::Email;
use platform::password::{ClearTextPassword, PasswordHasher};
use platform::token::TokenSigner;

use crate::application::config::AuthConfig;
use crate::application::credentials::verify_password;
use crate::domain::entity::AptitudeAccount;
use crate::domain::repository::AptitudeAccountRepository;
use crate::domain::value_object::TokenClaims;
use crate::error::{AuthError, AuthResult};

/// Applicant login input
pub struct ApplicantLoginInput {
    pub email: String,
    pub password: String,
}

/// Applicant login output
#[derive(Debug)]
pub struct ApplicantLoginOutput {
    pub token: String,
    pub account: AptitudeAccount,
}

/// Applicant login use case
pub struct ApplicantLoginUseCase<R>
where
    R: AptitudeAccountRepository,
{
    repo: Arc<R>,
    hasher: PasswordHasher,
    signer: TokenSigner,
    config: Arc<AuthConfig>,
}

impl<R> ApplicantLoginUseCase<R>
where
    R: AptitudeAccountRepository,
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

    pub async fn execute(&self, input: ApplicantLoginInput) -> AuthResult<ApplicantLoginOutput> {
        // Malformed email, unknown email and wrong password are indistinguishable
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let account = self
            .repo
            .find_account_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password = ClearTextPassword::for_verification(input.password);
        if !verify_password(&self.hasher, password, account.password_hash.clone()).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let claims = TokenClaims::for_applicant(
            &account,
            Utc::now().timestamp(),
            self.config.applicant_ttl_secs(),
        );
        let token = self.signer.issue(&claims)?;

        tracing::info!(
            credential_id = account.id.as_i64(),
            email = %account.email,
            "Applicant logged in"
        );

        Ok(ApplicantLoginOutput { token, account })
    }
}
