//! Refresh Token Entity
//!
//! Session-continuation record. Only a SHA-256 digest of the raw token is
//! persisted; the raw value lives exclusively in the client's HTTP-only
//! cookie. At most one row exists per user: a new login or a rotation
//! supersedes the previous token.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::user_id::UserId;

/// Refresh token entity
#[derive(Debug, Clone)]
pub struct RefreshToken {
    /// Owning user
    pub user_id: UserId,
    /// SHA-256 digest of the raw token, URL-safe base64
    pub token_hash: String,
    /// Expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Create a new refresh token record
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(user_id: UserId, token_hash: String, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            user_id,
            token_hash,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
        }
    }

    /// Check if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Compare a presented token digest against the stored one
    ///
    /// Constant-time, so a partially-matching digest takes as long to
    /// reject as a completely wrong one.
    pub fn matches(&self, presented_hash: &str) -> bool {
        platform::crypto::constant_time_eq(self.token_hash.as_bytes(), presented_hash.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_token_not_expired() {
        let token = RefreshToken::new(UserId::new(), "digest".to_string(), Duration::days(7));
        assert!(!token.is_expired());
    }

    #[test]
    fn test_expired_token() {
        let token = RefreshToken::new(UserId::new(), "digest".to_string(), Duration::seconds(-1));
        assert!(token.is_expired());
    }

    #[test]
    fn test_matches() {
        let token = RefreshToken::new(UserId::new(), "abc123".to_string(), Duration::days(7));
        assert!(token.matches("abc123"));
        assert!(!token.matches("abc124"));
        assert!(!token.matches("abc"));
    }
}
