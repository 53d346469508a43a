//! Token Issuer / Verifier
//!
//! JWT issuance and verification (HS256) for the two token classes, each
//! signed with its own symmetric secret:
//!
//! - **Access tokens**: short-lived, self-contained, never persisted.
//!   Possession of a valid, unexpired access token is sufficient for
//!   authorization until expiry, even after logout.
//! - **Refresh tokens**: long-lived, carry only the user id. Signature and
//!   expiry are checked here; the cross-check against the stored digest is
//!   the refresh use case's job.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::config::AuthConfig;
use crate::domain::value_object::{email::Email, user_id::UserId};

/// Signing algorithm, fixed for both token classes
pub const JWT_ALGORITHM: &str = "HS256";

/// Claim value distinguishing token classes
const TOKEN_TYPE_ACCESS: &str = "access";
const TOKEN_TYPE_REFRESH: &str = "refresh";

/// Token verification errors
///
/// Deliberately coarse: callers map everything to a single user-facing
/// "invalid token" response, so the variants exist for logging only.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signature mismatch, malformed structure, or expired
    #[error("invalid or expired token")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    /// Valid JWT of the wrong class (e.g. refresh token sent as access)
    #[error("wrong token type")]
    WrongType,
}

/// Access token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User id (UUID string)
    pub sub: String,
    /// User email at issuance
    pub email: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
    /// Always `"access"`
    pub token_type: String,
}

/// Refresh token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// User id (UUID string)
    pub sub: String,
    /// Unique token id; makes every issuance distinct even within the
    /// same iat second, so rotation always supersedes the prior value
    pub jti: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
    /// Always `"refresh"`
    pub token_type: String,
}

/// Token issuer / verifier
///
/// Holds the per-class keys derived from [`AuthConfig`]. Cheap to clone.
#[derive(Clone)]
pub struct TokenIssuer {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl TokenIssuer {
    /// Build an issuer from configuration
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl_secs: config.access_ttl_secs(),
            refresh_ttl_secs: config.refresh_ttl_secs(),
        }
    }

    /// Issue a signed access token
    pub fn issue_access(
        &self,
        user_id: &UserId,
        email: &Email,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user_id.to_string(),
            email: email.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_ttl_secs)).timestamp(),
            token_type: TOKEN_TYPE_ACCESS.to_string(),
        };

        encode(&Header::default(), &claims, &self.access_encoding)
    }

    /// Issue a signed refresh token
    pub fn issue_refresh(&self, user_id: &UserId) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = RefreshClaims {
            sub: user_id.to_string(),
            jti: uuid::Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.refresh_ttl_secs)).timestamp(),
            token_type: TOKEN_TYPE_REFRESH.to_string(),
        };

        encode(&Header::default(), &claims, &self.refresh_encoding)
    }

    /// Verify an access token: signature, expiry, and token class
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let claims: AccessClaims =
            decode(token, &self.access_decoding, &strict_validation())?.claims;

        if claims.token_type != TOKEN_TYPE_ACCESS {
            return Err(TokenError::WrongType);
        }

        Ok(claims)
    }

    /// Verify a refresh token's signature and expiry only
    ///
    /// Does not consult the store; the caller cross-checks the stored
    /// digest for the claimed user.
    pub fn verify_refresh_signature(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        let claims: RefreshClaims =
            decode(token, &self.refresh_decoding, &strict_validation())?.claims;

        if claims.token_type != TOKEN_TYPE_REFRESH {
            return Err(TokenError::WrongType);
        }

        Ok(claims)
    }
}

/// HS256 validation with exact expiry (no leeway)
fn strict_validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;
    validation
}
