//! Application configuration module
//!
//! Handles loading and validating configuration from environment variables.
//! Everything here is read once at startup and immutable afterwards.

use serde::Deserialize;
use std::net::Ipv4Addr;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
#[allow(dead_code)]
pub enum ConfigError {
    #[error("Failed to load environment variables: {0}")]
    EnvLoad(#[from] dotenvy::Error),

    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: Ipv4Addr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::new(0, 0, 0, 0),
            port: 3000,
        }
    }
}

/// Authentication gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Token lifetime handed to the issuer contract
    pub token_ttl_minutes: i64,
    /// Path prefixes that bypass authentication entirely
    pub exempt_prefixes: Vec<String>,
    /// Path prefixes that require the admin role
    pub admin_prefixes: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "gatekeeper-dev-secret-change-in-production".to_string(),
            token_ttl_minutes: 60,
            exempt_prefixes: vec!["/auth".to_string(), "/health".to_string()],
            admin_prefixes: vec!["/admin".to_string()],
        }
    }
}

impl AuthConfig {
    /// Whether a request path bypasses authentication
    pub fn is_exempt(&self, path: &str) -> bool {
        self.exempt_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix))
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3001".to_string()],
        }
    }
}

/// Complete application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        let server = ServerConfig {
            host: std::env::var("HOST")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or_else(|| ServerConfig::default().host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(|| ServerConfig::default().port),
        };

        let defaults = AuthConfig::default();
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                warn!("JWT_SECRET not set, using default (INSECURE - set in production!)");
                defaults.jwt_secret.clone()
            }
        };

        let auth = AuthConfig {
            jwt_secret,
            token_ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.token_ttl_minutes),
            exempt_prefixes: std::env::var("AUTH_EXEMPT_PREFIXES")
                .ok()
                .map(|v| parse_csv_list(&v))
                .unwrap_or_else(|| defaults.exempt_prefixes.clone()),
            admin_prefixes: std::env::var("AUTH_ADMIN_PREFIXES")
                .ok()
                .map(|v| parse_csv_list(&v))
                .unwrap_or_else(|| defaults.admin_prefixes.clone()),
        };

        if auth.token_ttl_minutes <= 0 {
            return Err(ConfigError::InvalidValue(
                "JWT_TTL_MINUTES must be positive".to_string(),
            ));
        }

        let cors = CorsConfig {
            allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|v| parse_csv_list(&v))
                .unwrap_or_else(|| CorsConfig::default().allowed_origins),
        };

        Ok(Self { server, auth, cors })
    }
}

/// Parse a comma-separated list, dropping empty entries
fn parse_csv_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, Ipv4Addr::new(0, 0, 0, 0));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_default_auth_config() {
        let config = AuthConfig::default();
        assert_eq!(config.token_ttl_minutes, 60);
        assert_eq!(config.exempt_prefixes, vec!["/auth", "/health"]);
        assert_eq!(config.admin_prefixes, vec!["/admin"]);
    }

    #[test]
    fn test_exempt_prefix_matching() {
        let config = AuthConfig::default();
        assert!(config.is_exempt("/auth"));
        assert!(config.is_exempt("/auth/signin"));
        assert!(config.is_exempt("/health"));
        assert!(!config.is_exempt("/todos"));
        assert!(!config.is_exempt("/admin"));
    }

    #[test]
    fn test_parse_csv_list() {
        assert_eq!(
            parse_csv_list("/admin, /internal"),
            vec!["/admin", "/internal"]
        );
        assert_eq!(parse_csv_list("/admin,"), vec!["/admin"]);
        assert!(parse_csv_list("").is_empty());
    }
}
