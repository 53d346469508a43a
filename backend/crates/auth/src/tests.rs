//! Use-case level tests for the auth crate
//!
//! Runs the register / login / refresh / logout flows against an
//! in-memory repository, so the lifecycle invariants are checked without
//! a database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::application::{
    GetProfileUseCase, LoginInput, LoginUseCase, LogoutUseCase, RefreshUseCase, RegisterInput,
    RegisterUseCase, ResetPasswordInput, ResetPasswordUseCase, UpdateProfileInput,
    UpdateProfileUseCase, UploadStatsUseCase, VerifyTokenUseCase,
};
use crate::domain::entity::{refresh_token::RefreshToken, user::User};
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// In-memory repository backing both traits
#[derive(Clone, Default)]
struct MemRepo {
    users: Arc<Mutex<HashMap<UserId, User>>>,
    tokens: Arc<Mutex<HashMap<UserId, RefreshToken>>>,
}

impl UserRepository for MemRepo {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| &u.email == email))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        self.users
            .lock()
            .unwrap()
            .insert(user.user_id, user.clone());
        Ok(())
    }

    async fn increment_upload_count(&self, email: &Email) -> AuthResult<Option<i64>> {
        let mut users = self.users.lock().unwrap();
        Ok(users.values_mut().find(|u| &u.email == email).map(|u| {
            u.upload_count += 1;
            u.upload_count
        }))
    }

    async fn upload_count(&self, email: &Email) -> AuthResult<Option<i64>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| &u.email == email)
            .map(|u| u.upload_count))
    }
}

impl RefreshTokenRepository for MemRepo {
    async fn replace_for_user(&self, token: &RefreshToken) -> AuthResult<()> {
        self.tokens
            .lock()
            .unwrap()
            .insert(token.user_id, token.clone());
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<RefreshToken>> {
        Ok(self.tokens.lock().unwrap().get(user_id).cloned())
    }

    async fn delete_for_user(&self, user_id: &UserId) -> AuthResult<u64> {
        Ok(self.tokens.lock().unwrap().remove(user_id).map_or(0, |_| 1))
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|_, t| !t.is_expired());
        Ok((before - tokens.len()) as u64)
    }
}

/// Token store that accepts writes but cannot delete
#[derive(Clone)]
struct RevocationFailure(MemRepo);

impl RefreshTokenRepository for RevocationFailure {
    async fn replace_for_user(&self, token: &RefreshToken) -> AuthResult<()> {
        self.0.replace_for_user(token).await
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<RefreshToken>> {
        self.0.find_by_user_id(user_id).await
    }

    async fn delete_for_user(&self, _user_id: &UserId) -> AuthResult<u64> {
        Err(AuthError::Internal("token store unavailable".to_string()))
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        self.0.cleanup_expired().await
    }
}

struct Harness {
    repo: Arc<MemRepo>,
    tokens: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl Harness {
    fn new() -> Self {
        let config = Arc::new(AuthConfig::with_random_secrets());
        Self {
            repo: Arc::new(MemRepo::default()),
            tokens: Arc::new(TokenIssuer::new(&config)),
            config,
        }
    }

    async fn register(&self, email: &str, password: &str) -> crate::application::RegisterOutput {
        RegisterUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.tokens.clone(),
            self.config.clone(),
        )
        .execute(RegisterInput {
            name: "Test User".to_string(),
            email: email.to_string(),
            company: "Acme".to_string(),
            password: password.to_string(),
        })
        .await
        .unwrap()
    }
}

#[tokio::test]
async fn test_register_then_login() {
    let h = Harness::new();
    let registered = h.register("user@example.com", "correct horse battery").await;

    assert_eq!(registered.user.upload_count, 0);
    // The access token issued at registration verifies immediately
    let claims = h.tokens.verify_access(&registered.access_token).unwrap();
    assert_eq!(claims.email, "user@example.com");

    let login = LoginUseCase::new(
        h.repo.clone(),
        h.repo.clone(),
        h.tokens.clone(),
        h.config.clone(),
    );

    let output = login
        .execute(LoginInput {
            email: "user@example.com".to_string(),
            password: "correct horse battery".to_string(),
        })
        .await
        .unwrap();
    assert!(h.tokens.verify_access(&output.access_token).is_ok());
}

#[tokio::test]
async fn test_duplicate_registration_rejected() {
    let h = Harness::new();
    h.register("user@example.com", "correct horse battery").await;

    let result = RegisterUseCase::new(
        h.repo.clone(),
        h.repo.clone(),
        h.tokens.clone(),
        h.config.clone(),
    )
    .execute(RegisterInput {
        name: "Other".to_string(),
        email: "user@example.com".to_string(),
        company: String::new(),
        password: "another password".to_string(),
    })
    .await;

    assert!(matches!(result, Err(AuthError::EmailTaken)));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let h = Harness::new();
    h.register("user@example.com", "correct horse battery").await;

    let login = LoginUseCase::new(
        h.repo.clone(),
        h.repo.clone(),
        h.tokens.clone(),
        h.config.clone(),
    );

    let wrong_password = login
        .execute(LoginInput {
            email: "user@example.com".to_string(),
            password: "wrong password".to_string(),
        })
        .await
        .unwrap_err();

    let unknown_email = login
        .execute(LoginInput {
            email: "ghost@example.com".to_string(),
            password: "correct horse battery".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    assert_eq!(wrong_password.to_string(), "Invalid credentials");
}

#[tokio::test]
async fn test_refresh_rotates_and_spends_the_old_token() {
    let h = Harness::new();
    let registered = h.register("user@example.com", "correct horse battery").await;

    let refresh = RefreshUseCase::new(
        h.repo.clone(),
        h.repo.clone(),
        h.tokens.clone(),
        h.config.clone(),
    );

    let rotated = refresh.execute(&registered.refresh_token).await.unwrap();
    assert!(h.tokens.verify_access(&rotated.access_token).is_ok());

    // The original token's signature is still valid, but its digest was
    // superseded by the rotation.
    let replay = refresh.execute(&registered.refresh_token).await;
    assert!(matches!(replay, Err(AuthError::InvalidRefreshToken)));

    // The rotated one works exactly once more
    assert!(refresh.execute(&rotated.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_refresh_rejects_garbage() {
    let h = Harness::new();
    h.register("user@example.com", "correct horse battery").await;

    let refresh = RefreshUseCase::new(
        h.repo.clone(),
        h.repo.clone(),
        h.tokens.clone(),
        h.config.clone(),
    );

    assert!(matches!(
        refresh.execute("not-a-jwt").await,
        Err(AuthError::InvalidRefreshToken)
    ));
}

#[tokio::test]
async fn test_logout_revokes_refresh_but_not_access() {
    let h = Harness::new();
    let registered = h.register("user@example.com", "correct horse battery").await;

    let logout = LogoutUseCase::new(h.repo.clone(), h.tokens.clone());
    logout
        .execute(Some(registered.refresh_token.as_str()))
        .await
        .unwrap();

    // Refresh flow is dead
    let refresh = RefreshUseCase::new(
        h.repo.clone(),
        h.repo.clone(),
        h.tokens.clone(),
        h.config.clone(),
    );
    assert!(refresh.execute(&registered.refresh_token).await.is_err());

    // The outstanding access token still authorizes until expiry
    assert!(h.tokens.verify_access(&registered.access_token).is_ok());

    // Logout stays successful with no token at all
    logout.execute(None).await.unwrap();
    logout.execute(Some("garbage")).await.unwrap();
}

#[tokio::test]
async fn test_reset_password_forces_reauthentication() {
    let h = Harness::new();
    let registered = h.register("user@example.com", "correct horse battery").await;

    let reset = ResetPasswordUseCase::new(h.repo.clone(), h.repo.clone());

    // Under the minimum length
    let short = reset
        .execute(ResetPasswordInput {
            email: "user@example.com".to_string(),
            new_password: "short".to_string(),
        })
        .await;
    assert!(matches!(short, Err(AuthError::Validation(_))));

    // Unknown user
    let unknown = reset
        .execute(ResetPasswordInput {
            email: "ghost@example.com".to_string(),
            new_password: "brand new password".to_string(),
        })
        .await;
    assert!(matches!(unknown, Err(AuthError::UserNotFound)));

    reset
        .execute(ResetPasswordInput {
            email: "user@example.com".to_string(),
            new_password: "brand new password".to_string(),
        })
        .await
        .unwrap();

    // Old refresh token was revoked alongside the old credential
    let refresh = RefreshUseCase::new(
        h.repo.clone(),
        h.repo.clone(),
        h.tokens.clone(),
        h.config.clone(),
    );
    assert!(refresh.execute(&registered.refresh_token).await.is_err());

    // Old password no longer logs in, new one does
    let login = LoginUseCase::new(
        h.repo.clone(),
        h.repo.clone(),
        h.tokens.clone(),
        h.config.clone(),
    );
    assert!(
        login
            .execute(LoginInput {
                email: "user@example.com".to_string(),
                password: "correct horse battery".to_string(),
            })
            .await
            .is_err()
    );
    assert!(
        login
            .execute(LoginInput {
                email: "user@example.com".to_string(),
                password: "brand new password".to_string(),
            })
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_reset_password_fails_closed_when_revocation_fails() {
    let h = Harness::new();
    let registered = h.register("user@example.com", "correct horse battery").await;

    let broken = Arc::new(RevocationFailure((*h.repo).clone()));
    let reset = ResetPasswordUseCase::new(h.repo.clone(), broken);

    let result = reset
        .execute(ResetPasswordInput {
            email: "user@example.com".to_string(),
            new_password: "brand new password".to_string(),
        })
        .await;
    assert!(result.is_err());

    // Nothing committed: the stored refresh token still rotates and the
    // old password still logs in.
    let refresh = RefreshUseCase::new(
        h.repo.clone(),
        h.repo.clone(),
        h.tokens.clone(),
        h.config.clone(),
    );
    assert!(refresh.execute(&registered.refresh_token).await.is_ok());

    let login = LoginUseCase::new(
        h.repo.clone(),
        h.repo.clone(),
        h.tokens.clone(),
        h.config.clone(),
    );
    assert!(
        login
            .execute(LoginInput {
                email: "user@example.com".to_string(),
                password: "correct horse battery".to_string(),
            })
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_get_profile_by_id() {
    let h = Harness::new();
    let registered = h.register("user@example.com", "correct horse battery").await;

    let get = GetProfileUseCase::new(h.repo.clone());
    let user = get.execute(&registered.user.user_id).await.unwrap();
    assert_eq!(user.email.as_str(), "user@example.com");
    assert_eq!(user.name, "Test User");
    assert_eq!(user.company, "Acme");

    assert!(matches!(
        get.execute(&UserId::new()).await,
        Err(AuthError::UserNotFound)
    ));
}

#[tokio::test]
async fn test_update_profile_writes_only_name_and_company() {
    let h = Harness::new();
    let registered = h.register("user@example.com", "correct horse battery").await;
    let user_id = registered.user.user_id;

    let update = UpdateProfileUseCase::new(h.repo.clone());

    // Absent fields are left untouched, present ones are trimmed
    let user = update
        .execute(
            &user_id,
            UpdateProfileInput {
                name: Some("  New Name  ".to_string()),
                company: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(user.name, "New Name");
    assert_eq!(user.company, "Acme");
    assert_eq!(user.email.as_str(), "user@example.com");

    // Company may be cleared; a blank name may not
    let user = update
        .execute(
            &user_id,
            UpdateProfileInput {
                name: None,
                company: Some("  ".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(user.name, "New Name");
    assert_eq!(user.company, "");

    assert!(matches!(
        update
            .execute(
                &user_id,
                UpdateProfileInput {
                    name: Some("   ".to_string()),
                    company: None,
                },
            )
            .await,
        Err(AuthError::Validation(_))
    ));

    // The credential is unreachable through a profile update
    let login = LoginUseCase::new(
        h.repo.clone(),
        h.repo.clone(),
        h.tokens.clone(),
        h.config.clone(),
    );
    assert!(
        login
            .execute(LoginInput {
                email: "user@example.com".to_string(),
                password: "correct horse battery".to_string(),
            })
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_login_supersedes_previous_refresh_token() {
    let h = Harness::new();
    let registered = h.register("user@example.com", "correct horse battery").await;

    // Second login replaces the stored digest
    let login = LoginUseCase::new(
        h.repo.clone(),
        h.repo.clone(),
        h.tokens.clone(),
        h.config.clone(),
    );
    let second = login
        .execute(LoginInput {
            email: "user@example.com".to_string(),
            password: "correct horse battery".to_string(),
        })
        .await
        .unwrap();

    let refresh = RefreshUseCase::new(
        h.repo.clone(),
        h.repo.clone(),
        h.tokens.clone(),
        h.config.clone(),
    );
    assert!(refresh.execute(&registered.refresh_token).await.is_err());
    assert!(refresh.execute(&second.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_upload_counter_counts_every_increment() {
    let h = Harness::new();
    h.register("user@example.com", "correct horse battery").await;
    let email = Email::new("user@example.com").unwrap();

    let uploads = Arc::new(UploadStatsUseCase::new(h.repo.clone()));
    assert_eq!(uploads.stats(&email).await.unwrap(), 0);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let uploads = uploads.clone();
        let email = email.clone();
        handles.push(tokio::spawn(async move {
            uploads.increment(&email).await.unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(uploads.stats(&email).await.unwrap(), 16);

    let ghost = Email::new("ghost@example.com").unwrap();
    assert!(matches!(
        uploads.increment(&ghost).await,
        Err(AuthError::UserNotFound)
    ));
}

#[tokio::test]
async fn test_verify_token_accepts_only_live_access_tokens() {
    let h = Harness::new();
    let registered = h.register("user@example.com", "correct horse battery").await;

    let verify = VerifyTokenUseCase::new(h.tokens.clone());

    let output = verify.execute(&registered.access_token).unwrap();
    assert_eq!(output.claims.email, "user@example.com");
    assert_eq!(output.algorithm, "HS256");

    // The refresh token is the wrong class
    assert!(matches!(
        verify.execute(&registered.refresh_token),
        Err(AuthError::InvalidToken)
    ));
}
