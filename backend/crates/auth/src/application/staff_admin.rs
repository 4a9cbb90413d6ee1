//! Staff Administration Use Cases
//!
//! Creating and listing staff users, and seeding the first admin at startup.

use std::sync::Arc;

use kernel::email::Email;
use kernel::principal::StaffRole;
use platform::password::{ClearTextPassword, PasswordHasher};

use crate::application::credentials::hash_password;
use crate::domain::entity::{NewStaffUser, StaffUser};
use crate::domain::repository::StaffUserRepository;
use crate::error::{AuthError, AuthResult};

/// Create staff user input
pub struct CreateStaffUserInput {
    pub email: String,
    pub password: String,
    pub role: String,
    pub full_name: String,
}

/// Create Staff User Use Case (admin only)
pub struct CreateStaffUserUseCase<R>
where
    R: StaffUserRepository,
{
    repo: Arc<R>,
    hasher: PasswordHasher,
}

impl<R> CreateStaffUserUseCase<R>
where
    R: StaffUserRepository,
{
    pub fn new(repo: Arc<R>, hasher: PasswordHasher) -> Self {
        Self { repo, hasher }
    }

    pub async fn execute(&self, input: CreateStaffUserInput) -> AuthResult<StaffUser> {
        let email = Email::new(&input.email)
            .map_err(|e| AuthError::validation("email", e.message()))?;
        let role = StaffRole::from_code(&input.role)
            .ok_or_else(|| AuthError::validation("role", "Role must be admin or hr"))?;
        let full_name = input.full_name.trim();
        if full_name.is_empty() {
            return Err(AuthError::validation("fullName", "Full name is required"));
        }
        let password = ClearTextPassword::new(input.password)?;

        let password_hash = hash_password(&self.hasher, password).await?;
        let user = self
            .repo
            .create_staff_user(&NewStaffUser {
                email,
                password_hash,
                role,
                full_name: full_name.to_string(),
            })
            .await?;

        tracing::info!(
            staff_user_id = user.id.as_i64(),
            role = %user.role,
            "Staff user created"
        );

        Ok(user)
    }
}

/// List Staff Users Use Case (admin only)
pub struct ListStaffUsersUseCase<R>
where
    R: StaffUserRepository,
{
    repo: Arc<R>,
}

impl<R> ListStaffUsersUseCase<R>
where
    R: StaffUserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> AuthResult<Vec<StaffUser>> {
        self.repo.list_staff_users().await
    }
}

/// First admin, read from the environment at startup
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Bootstrap Admin Use Case
///
/// Creates one admin when the staff table is empty; otherwise does nothing.
pub struct BootstrapAdminUseCase<R>
where
    R: StaffUserRepository,
{
    repo: Arc<R>,
    hasher: PasswordHasher,
}

impl<R> BootstrapAdminUseCase<R>
where
    R: StaffUserRepository,
{
    pub fn new(repo: Arc<R>, hasher: PasswordHasher) -> Self {
        Self { repo, hasher }
    }

    pub async fn execute(&self, admin: BootstrapAdmin) -> AuthResult<Option<StaffUser>> {
        if self.repo.count_staff_users().await? > 0 {
            tracing::debug!("Staff users present, skipping admin bootstrap");
            return Ok(None);
        }

        let created = CreateStaffUserUseCase::new(self.repo.clone(), self.hasher.clone())
            .execute(CreateStaffUserInput {
                email: admin.email,
                password: admin.password,
                role: StaffRole::Admin.code().to_string(),
                full_name: admin.full_name,
            })
            .await;

        match created {
            Ok(user) => {
                tracing::info!(staff_user_id = user.id.as_i64(), "Bootstrap admin created");
                Ok(Some(user))
            }
            // Another instance won the race
            Err(AuthError::Conflict(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
