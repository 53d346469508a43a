//! Verify Token Use Case
//!
//! Validates an access token and returns its decoded claims plus static
//! algorithm metadata. Intended for cross-service trust checks: no store
//! access is involved, so a peer service can verify a bearer token with
//! nothing but this endpoint.

use std::sync::Arc;

use crate::application::token::{AccessClaims, JWT_ALGORITHM, TokenIssuer};
use crate::error::{AuthError, AuthResult};

/// Verify token output
pub struct VerifyTokenOutput {
    pub claims: AccessClaims,
    /// Fixed signing algorithm identifier (`HS256`)
    pub algorithm: &'static str,
    /// Token class (`access`)
    pub token_type: &'static str,
}

/// Verify token use case
pub struct VerifyTokenUseCase {
    tokens: Arc<TokenIssuer>,
}

impl VerifyTokenUseCase {
    pub fn new(tokens: Arc<TokenIssuer>) -> Self {
        Self { tokens }
    }

    pub fn execute(&self, token: &str) -> AuthResult<VerifyTokenOutput> {
        let claims = self
            .tokens
            .verify_access(token)
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(VerifyTokenOutput {
            claims,
            algorithm: JWT_ALGORITHM,
            token_type: "access",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use crate::domain::value_object::{email::Email, user_id::UserId};

    #[test]
    fn test_verify_valid_token() {
        let tokens = Arc::new(TokenIssuer::new(&AuthConfig::with_random_secrets()));
        let use_case = VerifyTokenUseCase::new(tokens.clone());

        let user_id = UserId::new();
        let email = Email::new("user@example.com").unwrap();
        let token = tokens.issue_access(&user_id, &email).unwrap();

        let output = use_case.execute(&token).unwrap();
        assert_eq!(output.claims.sub, user_id.to_string());
        assert_eq!(output.algorithm, "HS256");
        assert_eq!(output.token_type, "access");
    }

    #[test]
    fn test_verify_garbage_token() {
        let tokens = Arc::new(TokenIssuer::new(&AuthConfig::with_random_secrets()));
        let use_case = VerifyTokenUseCase::new(tokens);

        assert!(matches!(
            use_case.execute("not-a-jwt"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_verify_refresh_token_rejected() {
        // A refresh token is not an access credential
        let tokens = Arc::new(TokenIssuer::new(&AuthConfig::with_random_secrets()));
        let use_case = VerifyTokenUseCase::new(tokens.clone());

        let refresh = tokens.issue_refresh(&UserId::new()).unwrap();
        assert!(matches!(
            use_case.execute(&refresh),
            Err(AuthError::InvalidToken)
        ));
    }
}
