//! Profile Use Cases
//!
//! Reads and updates the authenticated user's profile. Updates go through
//! an explicit allow list: only `name` and `company` are writable, so a
//! request body can never reach the email, password hash, or counters.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Get profile use case
pub struct GetProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> GetProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<User> {
        let Some(user) = self.user_repo.find_by_id(user_id).await? else {
            return Err(AuthError::UserNotFound);
        };
        Ok(user)
    }
}

/// Update profile input
///
/// Absent fields are left unchanged.
#[derive(Debug, Default)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub company: Option<String>,
}

/// Update profile use case
pub struct UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId, input: UpdateProfileInput) -> AuthResult<User> {
        let Some(mut user) = self.user_repo.find_by_id(user_id).await? else {
            return Err(AuthError::UserNotFound);
        };

        if let Some(name) = input.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AuthError::Validation("Name cannot be empty".to_string()));
            }
            user.set_name(name);
        }

        if let Some(company) = input.company {
            user.set_company(company.trim().to_string());
        }

        self.user_repo.update(&user).await?;
        tracing::debug!(user_id = %user.user_id, "Profile updated");
        Ok(user)
    }
}
