//! Application Configuration
//!
//! Configuration for the Auth application layer, loaded from environment
//! variables into a fixed struct with typed fields.
//!
//! | Variable                 | Meaning                         | Default |
//! |--------------------------|---------------------------------|---------|
//! | `JWT_ACCESS_SECRET`      | HS256 secret, access tokens     | none (required) |
//! | `JWT_REFRESH_SECRET`     | HS256 secret, refresh tokens    | none (required) |
//! | `JWT_ACCESS_EXPIRES_IN`  | access TTL (`900`, `15m`, `1h`) | `15m`   |
//! | `JWT_REFRESH_EXPIRES_IN` | refresh TTL (`7d`, ...)         | `7d`    |
//!
//! Secrets must be at least 32 characters; construction fails otherwise.
//! There are no production defaults for secrets.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Re-export cookie types from platform
pub use platform::cookie::{CookieConfig, SameSite};

/// Minimum secret length per token class
pub const MIN_SECRET_LENGTH: usize = 32;

/// Refresh token cookie name
pub const REFRESH_COOKIE_NAME: &str = "refreshToken";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),

    /// Secret shorter than [`MIN_SECRET_LENGTH`]
    #[error("{0} must be at least {MIN_SECRET_LENGTH} characters")]
    SecretTooShort(&'static str),

    /// Unparseable TTL value
    #[error("Invalid duration for {var}: {value:?}")]
    InvalidDuration { var: &'static str, value: String },
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 secret for access tokens (>= 32 chars)
    pub access_secret: String,
    /// HS256 secret for refresh tokens (>= 32 chars)
    pub refresh_secret: String,
    /// Access token lifetime (short, minutes-scale)
    pub access_ttl: Duration,
    /// Refresh token lifetime (long, days-scale)
    pub refresh_ttl: Duration,
    /// Whether to require Secure on the refresh cookie
    pub cookie_secure: bool,
    /// SameSite policy for the refresh cookie
    pub cookie_same_site: SameSite,
}

impl AuthConfig {
    /// Load configuration from environment variables
    ///
    /// Fails fast when a secret is missing or shorter than
    /// [`MIN_SECRET_LENGTH`] characters.
    pub fn from_env() -> Result<Self, ConfigError> {
        let access_secret = require_secret("JWT_ACCESS_SECRET")?;
        let refresh_secret = require_secret("JWT_REFRESH_SECRET")?;

        let access_ttl = ttl_from_env("JWT_ACCESS_EXPIRES_IN", Duration::from_secs(15 * 60))?;
        let refresh_ttl =
            ttl_from_env("JWT_REFRESH_EXPIRES_IN", Duration::from_secs(7 * 24 * 3600))?;

        Ok(Self {
            access_secret,
            refresh_secret,
            access_ttl,
            refresh_ttl,
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
        })
    }

    /// Create config with random secrets (for development)
    pub fn with_random_secrets() -> Self {
        Self {
            access_secret: random_secret(),
            refresh_secret: random_secret(),
            access_ttl: Duration::from_secs(15 * 60),
            refresh_ttl: Duration::from_secs(7 * 24 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secrets()
        }
    }

    /// Cookie configuration for setting the refresh cookie
    pub fn refresh_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: REFRESH_COOKIE_NAME.to_string(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/api/auth".to_string(),
            max_age_secs: Some(self.refresh_ttl.as_secs() as i64),
        }
    }

    /// Access TTL in whole seconds
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_ttl.as_secs() as i64
    }

    /// Refresh TTL in whole seconds
    pub fn refresh_ttl_secs(&self) -> i64 {
        self.refresh_ttl.as_secs() as i64
    }
}

fn require_secret(var: &'static str) -> Result<String, ConfigError> {
    let value = env::var(var).map_err(|_| ConfigError::MissingVar(var))?;
    if value.chars().count() < MIN_SECRET_LENGTH {
        return Err(ConfigError::SecretTooShort(var));
    }
    Ok(value)
}

fn ttl_from_env(var: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    match env::var(var) {
        Ok(value) => parse_ttl(&value).ok_or(ConfigError::InvalidDuration { var, value }),
        Err(_) => Ok(default),
    }
}

/// Parse a TTL string: plain seconds (`900`) or a number with an
/// `s`/`m`/`h`/`d` suffix (`15m`, `7d`).
pub fn parse_ttl(value: &str) -> Option<Duration> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let (number, multiplier) = match value.chars().last()? {
        's' => (&value[..value.len() - 1], 1u64),
        'm' => (&value[..value.len() - 1], 60),
        'h' => (&value[..value.len() - 1], 3600),
        'd' => (&value[..value.len() - 1], 86400),
        '0'..='9' => (value, 1),
        _ => return None,
    };

    let n: u64 = number.parse().ok()?;
    if n == 0 {
        return None;
    }
    Some(Duration::from_secs(n * multiplier))
}

fn random_secret() -> String {
    platform::crypto::to_base64_url(&platform::crypto::random_bytes(48))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ttl() {
        assert_eq!(parse_ttl("900"), Some(Duration::from_secs(900)));
        assert_eq!(parse_ttl("30s"), Some(Duration::from_secs(30)));
        assert_eq!(parse_ttl("15m"), Some(Duration::from_secs(900)));
        assert_eq!(parse_ttl("2h"), Some(Duration::from_secs(7200)));
        assert_eq!(parse_ttl("7d"), Some(Duration::from_secs(604800)));
        assert_eq!(parse_ttl(" 7d "), Some(Duration::from_secs(604800)));
    }

    #[test]
    fn test_parse_ttl_invalid() {
        assert_eq!(parse_ttl(""), None);
        assert_eq!(parse_ttl("0"), None);
        assert_eq!(parse_ttl("0m"), None);
        assert_eq!(parse_ttl("abc"), None);
        assert_eq!(parse_ttl("15w"), None);
        assert_eq!(parse_ttl("m"), None);
        assert_eq!(parse_ttl("-5m"), None);
    }

    #[test]
    fn test_development_secrets_are_long_enough() {
        let config = AuthConfig::development();
        assert!(config.access_secret.len() >= MIN_SECRET_LENGTH);
        assert!(config.refresh_secret.len() >= MIN_SECRET_LENGTH);
        assert_ne!(config.access_secret, config.refresh_secret);
        assert!(!config.cookie_secure);
    }

    #[test]
    fn test_refresh_cookie_shape() {
        let config = AuthConfig::with_random_secrets();
        let cookie = config.refresh_cookie();
        assert_eq!(cookie.name, REFRESH_COOKIE_NAME);
        assert!(cookie.http_only);
        assert_eq!(cookie.path, "/api/auth");
        assert_eq!(cookie.max_age_secs, Some(config.refresh_ttl_secs()));
    }
}
