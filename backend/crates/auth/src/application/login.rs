//! Login Use Case
//!
//! Authenticates a user, rotates their refresh token, and issues a fresh
//! access token.
//!
//! Lookup failure and password mismatch produce the same error: the
//! response never reveals whether the email exists.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::entity::refresh_token::RefreshToken;
use crate::domain::entity::user::User;
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub access_token: String,
    /// Raw refresh token, destined for the HTTP-only cookie
    pub refresh_token: String,
}

/// Login use case
pub struct LoginUseCase<U, R>
where
    U: UserRepository,
    R: RefreshTokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<R>,
    tokens: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<U, R> LoginUseCase<U, R>
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

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // A malformed email cannot belong to any account; same generic error
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&raw_password) {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self
            .tokens
            .issue_access(&user.user_id, &user.email)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let refresh_token = self
            .tokens
            .issue_refresh(&user.user_id)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        // Supersedes any previously stored token for this user
        let record = RefreshToken::new(
            user.user_id,
            platform::crypto::sha256_base64(refresh_token.as_bytes()),
            chrono::Duration::seconds(self.config.refresh_ttl_secs()),
        );
        self.token_repo.replace_for_user(&record).await?;

        tracing::info!(
            user_id = %user.user_id,
            "User logged in"
        );

        Ok(LoginOutput {
            user,
            access_token,
            refresh_token,
        })
    }
}
