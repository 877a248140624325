//! Error handling module
//!
//! Provides unified error types and handling for the entire application.
//! Every authentication failure resolves here to exactly one status code.

use crate::auth::TokenError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// `Authorization` header absent or not of the form `Bearer <token>`
    #[error("Authorization header is missing or malformed")]
    MissingOrMalformedHeader,

    /// Token failed to decode
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Decode succeeded but the claims payload is empty
    #[error("Token claims are empty")]
    EmptyClaims,

    /// Decode succeeded but the claims payload is unusable
    #[error("Token claims are unusable: {0}")]
    InvalidClaims(String),

    /// Valid credential, insufficient privilege
    #[error("Admin privileges required")]
    InsufficientRole,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            AppError::MissingOrMalformedHeader => (
                StatusCode::BAD_REQUEST,
                "MALFORMED_AUTH_HEADER",
                self.to_string(),
            ),
            AppError::Token(token_err) => {
                let (status, code) = match token_err {
                    TokenError::InvalidSignature => (StatusCode::UNAUTHORIZED, "INVALID_SIGNATURE"),
                    TokenError::Malformed => (StatusCode::UNAUTHORIZED, "MALFORMED_TOKEN"),
                    TokenError::Expired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
                    TokenError::UnsupportedScheme => (StatusCode::BAD_REQUEST, "UNSUPPORTED_TOKEN"),
                    TokenError::Other(_) => (StatusCode::BAD_REQUEST, "TOKEN_REJECTED"),
                };
                (status, code, token_err.to_string())
            }
            AppError::EmptyClaims => (StatusCode::BAD_REQUEST, "EMPTY_CLAIMS", self.to_string()),
            AppError::InvalidClaims(_) => {
                (StatusCode::BAD_REQUEST, "CLAIMS_REJECTED", self.to_string())
            }
            AppError::InsufficientRole => (StatusCode::FORBIDDEN, "FORBIDDEN", self.to_string()),
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
            code: Some(error_code.to_string()),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;
