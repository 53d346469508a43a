//! Logout Use Case
//!
//! Invalidates the caller's stored refresh token. Unconditionally
//! successful: a missing, garbled, or already-revoked token still results
//! in a cleared cookie and a 200.
//!
//! Outstanding access tokens are NOT invalidated; they remain usable
//! until expiry. This is the documented trade-off of stateless access
//! tokens, bounded by the short access TTL.

use std::sync::Arc;

use crate::application::token::TokenIssuer;
use crate::domain::repository::RefreshTokenRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<R>
where
    R: RefreshTokenRepository,
{
    token_repo: Arc<R>,
    tokens: Arc<TokenIssuer>,
}

impl<R> LogoutUseCase<R>
where
    R: RefreshTokenRepository,
{
    pub fn new(token_repo: Arc<R>, tokens: Arc<TokenIssuer>) -> Self {
        Self { token_repo, tokens }
    }

    /// Best-effort revocation; never fails
    pub async fn execute(&self, presented: Option<&str>) -> AuthResult<()> {
        let Some(presented) = presented else {
            return Ok(());
        };

        // Only a token we signed identifies a user worth revoking;
        // anything else is ignored.
        let Ok(claims) = self.tokens.verify_refresh_signature(presented) else {
            return Ok(());
        };
        let Ok(user_id) = UserId::parse(&claims.sub) else {
            return Ok(());
        };

        match self.token_repo.delete_for_user(&user_id).await {
            Ok(deleted) if deleted > 0 => {
                tracing::info!(user_id = %user_id, "User logged out");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Logout revocation failed");
            }
        }

        Ok(())
    }
}
