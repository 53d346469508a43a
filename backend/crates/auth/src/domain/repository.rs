//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{refresh_token::RefreshToken, user::User};
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by email (exact match)
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Update user
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// Atomically increment the upload counter, returning the new value
    ///
    /// Must be a single statement on the store side; concurrent calls may
    /// never lose an update. Returns `None` when the email is unknown.
    async fn increment_upload_count(&self, email: &Email) -> AuthResult<Option<i64>>;

    /// Read the upload counter. Returns `None` when the email is unknown.
    async fn upload_count(&self, email: &Email) -> AuthResult<Option<i64>>;
}

/// Refresh token repository trait
///
/// The store keeps at most one token per user; `replace_for_user` is the
/// only write path and must supersede any prior token atomically.
#[trait_variant::make(RefreshTokenRepository: Send)]
pub trait LocalRefreshTokenRepository {
    /// Insert or replace the user's refresh token in one atomic statement
    async fn replace_for_user(&self, token: &RefreshToken) -> AuthResult<()>;

    /// Find the stored token for a user
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<RefreshToken>>;

    /// Delete the user's token (logout, password reset). Idempotent.
    async fn delete_for_user(&self, user_id: &UserId) -> AuthResult<u64>;

    /// Clean up expired tokens
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
