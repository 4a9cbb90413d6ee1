//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::email::Email;
use kernel::id::{CredentialId, StaffUserId};
use kernel::principal::StaffRole;
use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entity::{AptitudeAccount, NewStaffUser, StaffUser};
use crate::domain::repository::{AptitudeAccountRepository, StaffUserRepository};
use crate::error::{AuthError, AuthResult};

const STAFF_COLUMNS: &str =
    "staff_user_id, email, password_hash, role, full_name, is_active, created_at";

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Aptitude Account Repository Implementation
// ============================================================================

impl AptitudeAccountRepository for PgAuthRepository {
    async fn find_account_by_email(&self, email: &Email) -> AuthResult<Option<AptitudeAccount>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT credential_id, email, password_hash, created_at
            FROM aptitude_credentials
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }
}

// ============================================================================
// Staff User Repository Implementation
// ============================================================================

impl StaffUserRepository for PgAuthRepository {
    async fn find_active_staff(
        &self,
        email: &Email,
        role: StaffRole,
    ) -> AuthResult<Option<StaffUser>> {
        let row = sqlx::query_as::<_, StaffUserRow>(&format!(
            "SELECT {STAFF_COLUMNS} FROM staff_users \
             WHERE email = $1 AND role = $2 AND is_active"
        ))
        .bind(email.as_str())
        .bind(role.code())
        .fetch_optional(&self.pool)
        .await?;

        row.map(StaffUserRow::into_staff_user).transpose()
    }

    async fn create_staff_user(&self, user: &NewStaffUser) -> AuthResult<StaffUser> {
        let row = sqlx::query_as::<_, StaffUserRow>(&format!(
            "INSERT INTO staff_users (email, password_hash, role, full_name) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {STAFF_COLUMNS}"
        ))
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.role.code())
        .bind(&user.full_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AuthError::Conflict("A staff user with this email already exists".into())
            }
            _ => AuthError::Database(e),
        })?;

        row.into_staff_user()
    }

    async fn list_staff_users(&self) -> AuthResult<Vec<StaffUser>> {
        let rows = sqlx::query_as::<_, StaffUserRow>(&format!(
            "SELECT {STAFF_COLUMNS} FROM staff_users ORDER BY created_at DESC, staff_user_id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(StaffUserRow::into_staff_user).collect()
    }

    async fn count_staff_users(&self) -> AuthResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM staff_users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    credential_id: i64,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AptitudeAccount {
        AptitudeAccount {
            id: CredentialId::from_i64(self.credential_id),
            email: Email::from_db(self.email),
            password_hash: HashedPassword::from_db(self.password_hash),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StaffUserRow {
    staff_user_id: i64,
    email: String,
    password_hash: String,
    role: String,
    full_name: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl StaffUserRow {
    fn into_staff_user(self) -> AuthResult<StaffUser> {
        let role = StaffRole::from_code(&self.role).ok_or_else(|| {
            AuthError::Internal(format!("Unknown staff role in database: {}", self.role))
        })?;

        Ok(StaffUser {
            id: StaffUserId::from_i64(self.staff_user_id),
            email: Email::from_db(self.email),
            password_hash: HashedPassword::from_db(self.password_hash),
            role,
            full_name: self.full_name,
            is_active: self.is_active,
            created_at: self.created_at,
        })
    }
}
