/**
 * Server Configuration
 *
 * This module loads the server configuration from environment variables.
 * `main` loads a `.env` file first, when one is present.
 *
 * # Variables
 *
 * - `JWT_SECRET` - Token signing secret. Unset or empty is accepted but
 *   logged; every token issuance then fails and every token is rejected.
 * - `SERVER_PORT` - Listen port, default `8080`
 * - `CORS_ALLOWED_ORIGIN` - Allowed CORS origin, default `http://localhost:3000`
 */

use std::fmt;

use axum::http::HeaderValue;
use thiserror::Error;

/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;

/// Default allowed CORS origin
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SERVER_PORT is not a valid port: {0:?}")]
    InvalidPort(String),

    #[error("CORS_ALLOWED_ORIGIN is not a valid header value: {0:?}")]
    InvalidOrigin(String),
}

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Token signing secret
    pub jwt_secret: String,
    /// Listen port
    pub port: u16,
    /// Value of `Access-Control-Allow-Origin`
    pub cors_allowed_origin: HeaderValue,
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() {
            tracing::warn!("JWT_SECRET not set. Token issuance and validation will fail.");
        }

        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let origin = lookup("CORS_ALLOWED_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let cors_allowed_origin =
            HeaderValue::from_str(&origin).map_err(|_| ConfigError::InvalidOrigin(origin.clone()))?;

        Ok(Self {
            jwt_secret,
            port,
            cors_allowed_origin,
        })
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("jwt_secret", &"<redacted>")
            .field("port", &self.port)
            .field("cors_allowed_origin", &self.cors_allowed_origin)
            .finish()
    }
}
