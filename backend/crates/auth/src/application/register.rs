//! Register Use Case
//!
//! Creates a new user account and signs them in immediately: the response
//! carries a fresh access token and the refresh cookie value.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::entity::{refresh_token::RefreshToken, user::User};
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub company: String,
    pub password: String,
}

/// Register output
pub struct RegisterOutput {
    pub user: User,
    pub access_token: String,
    /// Raw refresh token, destined for the HTTP-only cookie
    pub refresh_token: String,
}

/// Register use case
pub struct RegisterUseCase<U, R>
where
    U: UserRepository,
    R: RefreshTokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<R>,
    tokens: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<U, R> RegisterUseCase<U, R>
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

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AuthError::Validation("Name is required".to_string()));
        }

        let email = Email::new(&input.email)?;

        // Same length policy here as on reset
        let raw_password = RawPassword::new(input.password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = UserPassword::from_raw(&raw_password)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = User::new(email, name, input.company.trim().to_string(), password_hash);

        // A concurrent registration can still win the race; the unique
        // index maps that to EmailTaken in the repository.
        self.user_repo.create(&user).await?;

        let access_token = self
            .tokens
            .issue_access(&user.user_id, &user.email)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

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

        tracing::info!(
            user_id = %user.user_id,
            "User registered"
        );

        Ok(RegisterOutput {
            user,
            access_token,
            refresh_token,
        })
    }
}
