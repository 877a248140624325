//! JWT token codec
//!
//! Decodes and validates signed bearer tokens, and issues tokens on behalf of
//! the identity provider collaborating with this gateway.

use crate::auth::Role;
use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT claims carried by every token this gateway accepts
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: string-encoded user id
    pub sub: String,
    /// User email
    pub email: String,
    /// User role
    #[serde(rename = "userRole")]
    pub user_role: Role,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Token decode failures.
///
/// Each variant is a distinct failure mode the caller discriminates on: the
/// middleware maps signature/structure/expiry failures to 401 and the
/// unsupported/unknown cases to 400.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token is malformed")]
    Malformed,

    #[error("token has expired")]
    Expired,

    #[error("token algorithm or format is not supported")]
    UnsupportedScheme,

    #[error("token could not be decoded: {0}")]
    Other(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Utf8(_) => {
                TokenError::Malformed
            }
            // Payloads that are not valid JSON are structural damage; payloads
            // that parse but carry unusable values land in the catch-all.
            ErrorKind::Json(json_err) => match json_err.classify() {
                serde_json::error::Category::Data => TokenError::Other(err.to_string()),
                _ => TokenError::Malformed,
            },
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                TokenError::UnsupportedScheme
            }
            _ => TokenError::Other(err.to_string()),
        }
    }
}

/// Decode and validate a JWT token.
///
/// Pure CPU-bound verification over read-only key material; safe to call
/// concurrently from any number of request tasks.
pub fn decode_token(token: &str, key: &DecodingKey) -> Result<Claims, TokenError> {
    let token_data = decode::<Claims>(token, key, &Validation::default())?;
    Ok(token_data.claims)
}

/// Issue a signed token for a user.
///
/// This is the issuer contract consumed by the gateway: the identity provider
/// in front of which this gateway runs produces tokens in exactly this shape.
pub fn issue_token(
    user_id: i64,
    email: &str,
    role: Role,
    key: &EncodingKey,
    ttl_minutes: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        user_role: role,
        exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
        iat: now.timestamp(),
    };

    encode(&Header::default(), &claims, key)
        .map_err(|e| AppError::Internal(format!("Failed to issue token: {}", e)))
}
