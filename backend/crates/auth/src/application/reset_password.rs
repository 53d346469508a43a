//! Reset Password Use Case
//!
//! Replaces a user's password hash by email lookup and revokes the stored
//! refresh token, forcing every session to re-authenticate.

use std::sync::Arc;

use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Reset password input
pub struct ResetPasswordInput {
    pub email: String,
    pub new_password: String,
}

/// Reset password use case
pub struct ResetPasswordUseCase<U, R>
where
    U: UserRepository,
    R: RefreshTokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<R>,
}

impl<U, R> ResetPasswordUseCase<U, R>
where
    U: UserRepository,
    R: RefreshTokenRepository,
{
    pub fn new(user_repo: Arc<U>, token_repo: Arc<R>) -> Self {
        Self {
            user_repo,
            token_repo,
        }
    }

    pub async fn execute(&self, input: ResetPasswordInput) -> AuthResult<()> {
        let email = Email::new(&input.email)?;

        // Same length policy here as on registration
        let raw = RawPassword::new(input.new_password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        let Some(mut user) = self.user_repo.find_by_email(&email).await? else {
            return Err(AuthError::UserNotFound);
        };

        // Revoke the active session first: a stale refresh token must not
        // outlive the old credential, so a store failure here fails the
        // whole reset while the old password is still intact.
        self.token_repo.delete_for_user(&user.user_id).await?;

        let hashed = UserPassword::from_raw(&raw)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        user.set_password(hashed);
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Password reset");
        Ok(())
    }
}
