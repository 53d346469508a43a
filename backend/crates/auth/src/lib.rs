//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - User registration / login with email + password
//! - JWT access tokens (short-lived, stateless) and refresh tokens
//!   (long-lived, rotated on use, stored server-side as a hash)
//! - Password reset and profile updates
//! - Per-user upload counters with atomic increments
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - At most one valid refresh token per user; superseded on login/refresh
//! - Refresh token transported only as an HTTP-only cookie
//! - Logout revokes the refresh token; outstanding access tokens stay
//!   valid until expiry (bounded-blast-radius trade-off, not an oversight)
//! - Identical error responses for unknown email and wrong password

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::TokenIssuer;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAuthRepository as AuthStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
