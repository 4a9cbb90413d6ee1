//! In-Memory Repository Implementation

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use kernel::email::Email;
use kernel::id::{CredentialId, StaffUserId};
use kernel::principal::StaffRole;
use platform::password::HashedPassword;

use crate::domain::entity::{AptitudeAccount, NewStaffUser, StaffUser};
use crate::domain::repository::{AptitudeAccountRepository, StaffUserRepository};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct State {
    next_id: i64,
    accounts: Vec<AptitudeAccount>,
    staff: Vec<StaffUser>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Mutex-guarded repository; clones share the same tables
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    inner: Arc<Mutex<State>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> AuthResult<MutexGuard<'_, State>> {
        self.inner
            .lock()
            .map_err(|_| AuthError::Internal("in-memory store lock poisoned".into()))
    }

    /// Register an applicant credential, as intake would
    pub fn insert_account(
        &self,
        email: Email,
        password_hash: HashedPassword,
    ) -> AuthResult<AptitudeAccount> {
        let mut state = self.state()?;
        if state.accounts.iter().any(|account| account.email == email) {
            return Err(AuthError::Conflict("Credential already issued for this email".into()));
        }

        let account = AptitudeAccount {
            id: CredentialId::from_i64(state.next_id()),
            email,
            password_hash,
            created_at: Utc::now(),
        };
        state.accounts.push(account.clone());
        Ok(account)
    }

    /// Activate or deactivate a staff user; returns whether the email was found
    pub fn set_staff_active(&self, email: &Email, is_active: bool) -> AuthResult<bool> {
        let mut state = self.state()?;
        let Some(user) = state.staff.iter_mut().find(|user| user.email == *email) else {
            return Ok(false);
        };
        user.is_active = is_active;
        Ok(true)
    }
}

impl AptitudeAccountRepository for InMemoryAuthRepository {
    async fn find_account_by_email(&self, email: &Email) -> AuthResult<Option<AptitudeAccount>> {
        let state = self.state()?;
        Ok(state
            .accounts
            .iter()
            .find(|account| account.email == *email)
            .cloned())
    }
}

impl StaffUserRepository for InMemoryAuthRepository {
    async fn find_active_staff(
        &self,
        email: &Email,
        role: StaffRole,
    ) -> AuthResult<Option<StaffUser>> {
        let state = self.state()?;
        Ok(state
            .staff
            .iter()
            .find(|user| user.email == *email && user.role == role && user.is_active)
            .cloned())
    }

    async fn create_staff_user(&self, user: &NewStaffUser) -> AuthResult<StaffUser> {
        let mut state = self.state()?;
        if state.staff.iter().any(|existing| existing.email == user.email) {
            return Err(AuthError::Conflict(
                "A staff user with this email already exists".into(),
            ));
        }

        let id = StaffUserId::from_i64(state.next_id());
        let stored = user.clone().into_staff_user(id, Utc::now());
        state.staff.push(stored.clone());
        Ok(stored)
    }

    async fn list_staff_users(&self) -> AuthResult<Vec<StaffUser>> {
        let state = self.state()?;
        Ok(state.staff.iter().rev().cloned().collect())
    }

    async fn count_staff_users(&self) -> AuthResult<i64> {
        let state = self.state()?;
        Ok(state.staff.len() as i64)
    }
}
