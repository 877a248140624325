//! Bearer scheme extraction
//!
//! Strips the `Bearer ` prefix from the raw `Authorization` header value.

use crate::error::AppError;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization` header value.
///
/// A missing header or a value that does not carry the Bearer scheme is a
/// hard error, never an anonymous pass-through.
pub fn extract_token(header: Option<&str>) -> Result<&str, AppError> {
    header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .ok_or(AppError::MissingOrMalformedHeader)
}
