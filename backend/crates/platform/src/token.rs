//! Signed bearer tokens (HS256 JWT)
//!
//! The signer only handles the envelope. Claim shapes and lifetimes belong
//! to the caller; `exp` is validated on decode.

use std::fmt;
use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// HS256 needs at least as many key bytes as the digest.
pub const MIN_SECRET_LENGTH: usize = 32;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Signing secret must be at least {MIN_SECRET_LENGTH} bytes")]
    WeakSecret,

    #[error("Failed to sign token: {0}")]
    Sign(String),

    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,
}

#[derive(Clone)]
pub struct TokenSigner {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl TokenSigner {
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(TokenError::WeakSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding: Arc::new(EncodingKey::from_secret(secret)),
            decoding: Arc::new(DecodingKey::from_secret(secret)),
            validation: Arc::new(validation),
        })
    }

    pub fn issue<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| TokenError::Sign(e.to_string()))
    }

    pub fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError> {
        decode::<C>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner").finish_non_exhaustive()
    }
}
