//! Infrastructure Layer
//!
//! Repository implementations backed by PostgreSQL.

pub mod postgres;

pub use postgres::PgAuthRepository;
