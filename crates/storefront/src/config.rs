//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `COMMERCE_API_URL` - Commerce API base URL
//!   (default: <https://cart-backend-ashy.vercel.app/api>)
//! - `COMMERCE_USER_ID` - Caller identity sent in the `user-id` header
//!   (default: `user_12345`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate, 0.0 to 1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default commerce API base URL.
pub const DEFAULT_COMMERCE_API_URL: &str = "https://cart-backend-ashy.vercel.app/api";

/// Default caller identity.
pub const DEFAULT_COMMERCE_USER_ID: &str = "user_12345";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Commerce API configuration
    pub commerce: CommerceApiConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of errors reported to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Commerce API connection settings.
///
/// Implements `Debug` manually to redact the caller identity.
#[derive(Clone)]
pub struct CommerceApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: Url,
    /// Value of the `user-id` header
    pub user_id: SecretString,
}

impl std::fmt::Debug for CommerceApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommerceApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("user_id", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontConfig {
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

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;

        let commerce = CommerceApiConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_sample_rate("SENTRY_SAMPLE_RATE", 1.0)?;
        let sentry_traces_sample_rate = get_sample_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?;

        Ok(Self {
            host,
            port,
            base_url,
            commerce,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Plain-HTTP settings on `127.0.0.1:3000` around `commerce`, with
    /// Sentry disabled.
    #[must_use]
    pub fn local(commerce: CommerceApiConfig) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            commerce,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS (secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl CommerceApiConfig {
    /// Load the commerce API settings, falling back to the public demo API.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `COMMERCE_API_URL` is not an
    /// absolute http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = get_env_or_default("COMMERCE_API_URL", DEFAULT_COMMERCE_API_URL);
        let base_url = parse_api_url(&raw)
            .map_err(|reason| ConfigError::InvalidEnvVar("COMMERCE_API_URL".to_string(), reason))?;
        let user_id = SecretString::from(get_env_or_default(
            "COMMERCE_USER_ID",
            DEFAULT_COMMERCE_USER_ID,
        ));

        Ok(Self { base_url, user_id })
    }

    /// Settings pointing at `base_url` with the default caller identity.
    ///
    /// # Errors
    ///
    /// Returns the reason `base_url` is unusable as an API base.
    pub fn with_base_url(base_url: &str) -> Result<Self, String> {
        Ok(Self {
            base_url: parse_api_url(base_url)?,
            user_id: SecretString::from(DEFAULT_COMMERCE_USER_ID),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse and validate an API base URL.
fn parse_api_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.cannot_be_a_base() {
        return Err("must be a base URL".to_string());
    }
    Ok(url)
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a sample rate in `0.0..=1.0`.
fn get_sample_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };
    parse_sample_rate(&raw).map_err(|reason| ConfigError::InvalidEnvVar(key.to_string(), reason))
}

fn parse_sample_rate(raw: &str) -> Result<f32, String> {
    let rate = raw.trim().parse::<f32>().map_err(|e| e.to_string())?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(format!("must be between 0.0 and 1.0 (got {rate})"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn config() -> StorefrontConfig {
        StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            commerce: CommerceApiConfig::with_base_url(DEFAULT_COMMERCE_API_URL).unwrap(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = config().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_is_secure() {
        let mut config = config();
        assert!(!config.is_secure());
        config.base_url = "https://shop.example.com".to_string();
        assert!(config.is_secure());
    }

    #[test]
    fn test_parse_api_url() {
        let url = parse_api_url(DEFAULT_COMMERCE_API_URL).unwrap();
        assert_eq!(url.path(), "/api");

        assert!(parse_api_url("not a url").is_err());
        assert!(parse_api_url("ftp://example.com/api").is_err());
        assert!(parse_api_url("mailto:ops@example.com").is_err());
    }

    #[test]
    fn test_parse_sample_rate() {
        assert!((parse_sample_rate("0.25").unwrap() - 0.25).abs() < f32::EPSILON);
        assert!(parse_sample_rate("1.5").is_err());
        assert!(parse_sample_rate("-0.1").is_err());
        assert!(parse_sample_rate("lots").is_err());
    }

    #[test]
    fn test_default_user_id() {
        let commerce = CommerceApiConfig::with_base_url("http://127.0.0.1:9000/api").unwrap();
        assert_eq!(commerce.user_id.expose_secret(), DEFAULT_COMMERCE_USER_ID);
    }

    #[test]
    fn test_commerce_config_debug_redacts_user_id() {
        let commerce = CommerceApiConfig {
            base_url: Url::parse("https://api.example.com/api").unwrap(),
            user_id: SecretString::from("user_top_secret"),
        };

        let debug_output = format!("{commerce:?}");

        assert!(debug_output.contains("https://api.example.com/api"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("user_top_secret"));
    }
}
