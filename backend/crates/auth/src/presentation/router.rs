//! Auth Router

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_auth;

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static,
{
    let tokens = Arc::new(TokenIssuer::new(&config));

    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        tokens: tokens.clone(),
    };

    let protected = Router::new()
        .route("/profile", get(handlers::profile::<R>))
        .route("/update-profile", put(handlers::update_profile::<R>))
        .route("/upload-stats", get(handlers::upload_stats::<R>))
        .route("/increment-upload", post(handlers::increment_upload::<R>))
        .route_layer(from_fn(move |req, next| {
            require_auth(tokens.clone(), req, next)
        }));

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/refresh", post(handlers::refresh::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route("/verify-token", post(handlers::verify_token::<R>))
        .route("/reset-password", post(handlers::reset_password::<R>))
        .merge(protected)
        .with_state(state)
}
