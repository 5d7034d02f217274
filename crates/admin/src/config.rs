//! Configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_API_BASE_URL` - Base URL of the remote catalog API
//!
//! ## Optional
//! - `CATALOG_UPLOADS_BASE_URL` - Base URL for stored product images
//!   (default: `{CATALOG_API_BASE_URL}/uploads`)
//! - `CATALOG_HOST` - Bind address (default: 127.0.0.1)
//! - `CATALOG_PORT` - Listen port (default: 3000)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog front-end configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Base URL of the remote catalog API (no trailing slash)
    pub api_base_url: String,
    /// Base URL stored image filenames are resolved against
    pub uploads_base_url: String,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("CATALOG_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("CATALOG_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_PORT".to_string(), e.to_string()))?;

        let api_base_url = normalize_base_url("CATALOG_API_BASE_URL", &get_required_env("CATALOG_API_BASE_URL")?)?;
        let uploads_base_url = match get_optional_env("CATALOG_UPLOADS_BASE_URL") {
            Some(raw) => normalize_base_url("CATALOG_UPLOADS_BASE_URL", &raw)?,
            None => format!("{api_base_url}/uploads"),
        };

        Ok(Self {
            host,
            port,
            api_base_url,
            uploads_base_url,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate a base URL and strip any trailing slash.
fn normalize_base_url(var_name: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim_end_matches('/');
    url::Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url_strips_trailing_slash() {
        let url = normalize_base_url("TEST_VAR", "http://localhost:3000/").unwrap();
        assert_eq!(url, "http://localhost:3000");
    }

    #[test]
    fn test_normalize_base_url_rejects_garbage() {
        let result = normalize_base_url("TEST_VAR", "not a url");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_socket_addr() {
        let config = AdminConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            api_base_url: "http://localhost:8080".to_string(),
            uploads_base_url: "http://localhost:8080/uploads".to_string(),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
