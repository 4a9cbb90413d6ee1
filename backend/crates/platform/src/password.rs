//! Password Hashing and Verification
//!
//! - Argon2id hashing with a per-call random salt (PHC string output)
//! - Optional application-wide pepper
//! - Zeroization of clear text material
//! - One-time password generation for aptitude-test accounts
//!
//! Staff passwords go through [`ClearTextPassword::new`], which enforces the
//! length policy. Login attempts use [`ClearTextPassword::for_verification`] so
//! that a policy change never locks out an existing account.

use std::fmt;
use std::sync::Arc;

use argon2::password_hash::{PasswordHasher as _, PasswordVerifier as _, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHash, Version};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::crypto;

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length (NIST: SHALL be at least 8)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (NIST: SHOULD permit at least 64)
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Random bytes behind a one-time password (rendered as 8 hex characters)
pub const ONE_TIME_PASSWORD_BYTES: usize = 4;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password contains invalid characters (control characters)
    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password, enforcing the account password policy
    ///
    /// Unicode is normalized using NFKC before validation and lengths are
    /// counted in code points.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let candidate = Self::for_verification(raw);
        let normalized = candidate.0.as_str();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        // Control characters other than space/tab/newline
        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != ' ' && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(candidate)
    }

    /// Wrap a submitted password for comparison only (no policy applied)
    pub fn for_verification(raw: String) -> Self {
        let raw = Zeroizing::new(raw);
        Self(raw.nfkc().collect())
    }

    /// Generate a fresh one-time password from the OS CSPRNG
    ///
    /// 4 random bytes rendered as 8 lowercase hex characters.
    pub fn generate_one_time() -> Self {
        Self(crypto::random_hex(ONE_TIME_PASSWORD_BYTES))
    }

    /// Borrow the plaintext, e.g. to embed it in an invitation email
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// Algorithm, version, parameters and salt all travel inside the string,
/// so hashes made with older parameters keep verifying.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    /// Wrap a stored string without parsing it
    ///
    /// A malformed value simply never verifies.
    pub fn from_db(s: impl Into<String>) -> Self {
        Self { hash: s.into() }
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Argon2id hasher holding the cost parameters and optional pepper
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    pepper: Option<Arc<[u8]>>,
}

impl PasswordHasher {
    /// OWASP recommended Argon2id parameters (m=19456 KiB, t=2, p=1)
    pub fn new(pepper: Option<Vec<u8>>) -> Self {
        Self::with_params(Params::default(), pepper)
    }

    /// Minimal cost parameters. Never use outside of tests.
    #[cfg(any(test, feature = "test-support"))]
    pub fn fast_insecure() -> Self {
        let params = Params::new(
            Params::MIN_M_COST,
            Params::MIN_T_COST,
            Params::MIN_P_COST,
            None,
        )
        .unwrap_or_default();
        Self::with_params(params, None)
    }

    fn with_params(params: Params, pepper: Option<Vec<u8>>) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            pepper: pepper.filter(|p| !p.is_empty()).map(Arc::from),
        }
    }

    fn peppered(&self, password: &ClearTextPassword) -> Zeroizing<Vec<u8>> {
        let mut combined = Zeroizing::new(password.as_bytes().to_vec());
        if let Some(pepper) = &self.pepper {
            combined.extend_from_slice(pepper);
        }
        combined
    }

    /// Hash with a fresh random salt (128 bits)
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(OsRng);
        let hash = self
            .argon2
            .hash_password(&self.peppered(password), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    /// Verify a password against a stored hash
    ///
    /// Parameters are read from the PHC string; the comparison is constant-time
    /// inside argon2. Any parse or verification error yields `false`.
    pub fn verify(&self, password: &ClearTextPassword, hashed: &HashedPassword) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&hashed.hash) else {
            return false;
        };

        self.argon2
            .verify_password(&self.peppered(password), &parsed_hash)
            .is_ok()
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
