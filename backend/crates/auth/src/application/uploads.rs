//! Upload Counter Use Case
//!
//! Tracks per-user upload counts. The increment happens in a single SQL
//! statement inside the repository, so concurrent uploads never lose a
//! count.

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Upload stats use case
pub struct UploadStatsUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UploadStatsUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Atomically bump the counter, returning the new value.
    pub async fn increment(&self, email: &Email) -> AuthResult<i64> {
        let Some(count) = self.user_repo.increment_upload_count(email).await? else {
            return Err(AuthError::UserNotFound);
        };
        tracing::debug!(upload_count = count, "Upload counted");
        Ok(count)
    }

    /// Current counter value.
    pub async fn stats(&self, email: &Email) -> AuthResult<i64> {
        let Some(count) = self.user_repo.upload_count(email).await? else {
            return Err(AuthError::UserNotFound);
        };
        Ok(count)
    }
}
