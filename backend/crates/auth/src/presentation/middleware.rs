//! Bearer Token Middleware
//!
//! Verifies `Authorization: Bearer <jwt>` and inserts the caller's
//! [`Principal`] into request extensions. Use with
//! `axum::middleware::from_fn_with_state`.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use http::header::AUTHORIZATION;
use kernel::principal::Principal;
use platform::token::TokenSigner;

use crate::domain::value_object::TokenClaims;
use crate::error::{AuthError, AuthResult};

/// Middleware state
#[derive(Debug, Clone)]
pub struct BearerAuthState {
    pub signer: TokenSigner,
}

impl BearerAuthState {
    pub fn new(signer: TokenSigner) -> Self {
        Self { signer }
    }

    fn authenticate(&self, req: &Request) -> AuthResult<Principal> {
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?;
        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::InvalidToken)?;

        let claims: TokenClaims = self.signer.verify(token)?;
        claims.into_principal().ok_or(AuthError::InvalidToken)
    }
}

async fn guard(
    state: &BearerAuthState,
    mut req: Request,
    next: Next,
    allowed: fn(&Principal) -> bool,
) -> AuthResult<Response> {
    let principal = state.authenticate(&req)?;
    if !allowed(&principal) {
        return Err(AuthError::Forbidden);
    }

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// Admin or HR
pub async fn require_staff(
    State(state): State<BearerAuthState>,
    req: Request,
    next: Next,
) -> AuthResult<Response> {
    guard(&state, req, next, |p| p.staff_role().is_some()).await
}

/// Admin only
pub async fn require_admin(
    State(state): State<BearerAuthState>,
    req: Request,
    next: Next,
) -> AuthResult<Response> {
    guard(&state, req, next, Principal::is_admin).await
}

/// Applicant aptitude token
pub async fn require_applicant(
    State(state): State<BearerAuthState>,
    req: Request,
    next: Next,
) -> AuthResult<Response> {
    guard(&state, req, next, |p| matches!(p, Principal::Applicant { .. })).await
}
