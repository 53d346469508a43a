//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, random bytes, Base64)
//! - Password hashing (Argon2id, adaptive and salted)
//! - Cookie management

pub mod cookie;
pub mod crypto;
pub mod password;
