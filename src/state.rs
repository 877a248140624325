//! Application state management
//!
//! Contains shared state accessible across all handlers and middleware.
//! Key material is derived once at startup and read-only afterwards, so
//! token verification needs no locking on the request path.

use crate::config::AuthConfig;
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    /// Authentication gateway configuration
    pub auth: AuthConfig,

    /// Key used by the issuer contract to sign tokens
    pub encoding_key: EncodingKey,

    /// Key used to verify inbound tokens
    pub decoding_key: DecodingKey,
}

impl AppState {
    /// Create new application state from loaded configuration
    pub fn new(auth: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(auth.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(auth.jwt_secret.as_bytes());

        Self {
            auth,
            encoding_key,
            decoding_key,
        }
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
