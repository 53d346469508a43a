//! Auth Middleware
//!
//! Bearer-token authentication for protected routes. Verification is
//! purely cryptographic (signature + expiry); no store round trip.

use axum::body::Body;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::token::TokenIssuer;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AuthError;

/// Identity extracted from a verified access token, stored in request
/// extensions for downstream handlers
#[derive(Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: Email,
}

/// Middleware that requires a valid Bearer access token
pub async fn require_auth(
    tokens: Arc<TokenIssuer>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = match bearer_token(&req) {
        Some(token) => token,
        None => return Err(AuthError::InvalidToken.into_response()),
    };

    let claims = match tokens.verify_access(token) {
        Ok(claims) => claims,
        Err(_) => return Err(AuthError::InvalidToken.into_response()),
    };

    // The sub claim was written by us at issuance; a parse failure here
    // means the token was signed with a leaked secret, treat it the same.
    let user_id = match UserId::parse(&claims.sub) {
        Ok(id) => id,
        Err(_) => return Err(AuthError::InvalidToken.into_response()),
    };

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: Email::from_db(claims.email),
    });

    Ok(next.run(req).await)
}

fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
