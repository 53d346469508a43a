//! Refresh Use Case
//!
//! Exchanges a valid refresh token for a new access token, rotating the
//! refresh token in the same step.
//!
//! Validation order:
//! 1. signature + expiry of the presented token (no store access)
//! 2. a stored, unexpired digest exists for the claimed user
//! 3. the presented token's digest matches the stored one
//! 4. the owning user still exists
//!
//! Every failure collapses into the same "Invalid refresh token" response.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::entity::refresh_token::RefreshToken;
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Refresh output
pub struct RefreshOutput {
    pub access_token: String,
    /// Rotated raw refresh token, destined for the HTTP-only cookie
    pub refresh_token: String,
}

/// Refresh use case
pub struct RefreshUseCase<U, R>
where
    U: UserRepository,
    R: RefreshTokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<R>,
    tokens: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<U, R> RefreshUseCase<U, R>
where
    U: UserRepository,
    R: RefreshTokenRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        token_repo: Arc<R>,
        tokens: Arc<TokenIssuer>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            token_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, presented: &str) -> AuthResult<RefreshOutput> {
        let claims = self
            .tokens
            .verify_refresh_signature(presented)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        let user_id = UserId::parse(&claims.sub).map_err(|_| AuthError::InvalidRefreshToken)?;

        let stored = self
            .token_repo
            .find_by_user_id(&user_id)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        if stored.is_expired() {
            self.token_repo.delete_for_user(&user_id).await?;
            return Err(AuthError::InvalidRefreshToken);
        }

        // The stored digest only matches the most recently issued token;
        // a superseded token fails here even though its signature is valid.
        let presented_hash = platform::crypto::sha256_base64(presented.as_bytes());
        if !stored.matches(&presented_hash) {
            return Err(AuthError::InvalidRefreshToken);
        }

        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        let access_token = self
            .tokens
            .issue_access(&user.user_id, &user.email)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        // Rotation: the presented token is spent
        let refresh_token = self
            .tokens
            .issue_refresh(&user.user_id)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let record = RefreshToken::new(
            user.user_id,
            platform::crypto::sha256_base64(refresh_token.as_bytes()),
            chrono::Duration::seconds(self.config.refresh_ttl_secs()),
        );
        self.token_repo.replace_for_user(&record).await?;

        tracing::debug!(
            user_id = %user.user_id,
            "Refresh token rotated"
        );

        Ok(RefreshOutput {
            access_token,
            refresh_token,
        })
    }
}
