//! Authentication middleware
//!
//! The request filter in front of every non-exempt route: extracts the bearer
//! token, validates it, publishes the caller identity into the request
//! extensions, and enforces admin-only path prefixes. Any rejection
//! short-circuits the chain before the handler runs.

use crate::auth::{authorize, decode_token, extract_token, Access, Claims, Identity};
use crate::error::AppError;
use crate::state::SharedState;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Authenticate the request and enforce path-based authorization.
///
/// Exempt prefixes (e.g. `/auth`) pass straight through with no identity.
/// Everything else must carry a decodable bearer token; the identity derived
/// from it is inserted into the request extensions as a single value before
/// the downstream handler runs.
pub async fn auth_middleware(
    State(state): State<SharedState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if state.auth.is_exempt(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());
    let token = extract_token(header)?;
    let claims = decode_token(token, &state.decoding_key)?;
    let identity = identity_from_claims(claims)?;

    let path = request.uri().path();
    if authorize(path, identity.role, &state.auth.admin_prefixes) == Access::Denied {
        debug!(user_id = identity.user_id, path, "admin access denied");
        return Err(AppError::InsufficientRole);
    }

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Turn decoded claims into a usable identity.
///
/// Decode success does not guarantee usable claims: an empty subject or email
/// and a non-numeric subject are rejected before anything is published.
fn identity_from_claims(claims: Claims) -> Result<Identity, AppError> {
    if claims.sub.is_empty() || claims.email.is_empty() {
        return Err(AppError::EmptyClaims);
    }

    let user_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::InvalidClaims(format!("subject is not a numeric id: {}", claims.sub)))?;

    Ok(Identity {
        user_id,
        email: claims.email,
        role: claims.user_role,
    })
}
