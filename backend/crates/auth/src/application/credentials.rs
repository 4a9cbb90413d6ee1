//! Argon2 work moved off the async workers

use platform::password::{ClearTextPassword, HashedPassword, PasswordHasher};

use crate::error::{AuthError, AuthResult};

pub(crate) async fn verify_password(
    hasher: &PasswordHasher,
    password: ClearTextPassword,
    hashed: HashedPassword,
) -> AuthResult<bool> {
    let hasher = hasher.clone();
    tokio::task::spawn_blocking(move || hasher.verify(&password, &hashed))
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task failed: {e}")))
}

pub(crate) async fn hash_password(
    hasher: &PasswordHasher,
    password: ClearTextPassword,
) -> AuthResult<HashedPassword> {
    let hasher = hasher.clone();
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AuthError::Internal(e.to_string()))
}
