//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `NESZI_API_BASE_URL` - Base URL of the admin API
//!   (e.g. `https://neszi-backend.onrender.com/api/admin`)
//!
//! ## Optional
//! - `NESZI_TOKEN_FILE` - Path the session token is persisted at
//!   (default: `.neszi-token` in the current directory)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default token file, relative to the working directory.
const DEFAULT_TOKEN_FILE: &str = ".neszi-token";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the admin API. Endpoint paths are joined onto this.
    pub base_url: Url,
    /// Where the file-backed session store keeps the token.
    pub token_file: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `NESZI_API_BASE_URL` is missing or not a
    /// valid absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_base = std::env::var("NESZI_API_BASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("NESZI_API_BASE_URL".to_string()))?;
        let base_url = Self::parse_base_url(&raw_base)?;

        let token_file = std::env::var("NESZI_TOKEN_FILE")
            .map_or_else(|_| PathBuf::from(DEFAULT_TOKEN_FILE), PathBuf::from);

        Ok(Self {
            base_url,
            token_file,
        })
    }

    /// Construct a config directly (tests, embedding).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if `base_url` is not a valid
    /// absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: Self::parse_base_url(base_url)?,
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
        })
    }

    fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
        // A trailing slash changes how Url::join resolves relative paths;
        // normalize it away so "/products" always lands under the base.
        let trimmed = raw.trim_end_matches('/');
        let url = Url::parse(trimmed).map_err(|e| {
            ConfigError::InvalidEnvVar("NESZI_API_BASE_URL".to_string(), e.to_string())
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidEnvVar(
                "NESZI_API_BASE_URL".to_string(),
                "must be an http(s) base URL".to_string(),
            ));
        }
        Ok(url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_valid_base() {
        let config = ClientConfig::new("https://neszi-backend.onrender.com/api/admin").unwrap();
        assert_eq!(
            config.base_url.as_str(),
            "https://neszi-backend.onrender.com/api/admin"
        );
    }

    #[test]
    fn test_new_strips_trailing_slash() {
        let config = ClientConfig::new("http://localhost:5000/api/admin/").unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:5000/api/admin");
    }

    #[test]
    fn test_new_rejects_garbage() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnvVar("NESZI_API_BASE_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: NESZI_API_BASE_URL"
        );
    }
}
