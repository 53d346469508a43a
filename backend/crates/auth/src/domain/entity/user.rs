//! User Entity
//!
//! Core identity record: profile data plus the password hash and the
//! upload counter. The password hash never leaves this entity through
//! API responses (DTO conversion strips it).

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, user_id::UserId, user_password::UserPassword,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Email (unique, stored case-sensitively)
    pub email: Email,
    /// Display name
    pub name: String,
    /// Company name
    pub company: String,
    /// Hashed password (never logged or returned)
    pub password_hash: UserPassword,
    /// Monotonic upload counter
    pub upload_count: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(email: Email, name: String, company: String, password_hash: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            name,
            company,
            password_hash,
            upload_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the password hash (password reset)
    pub fn set_password(&mut self, password_hash: UserPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Update display name
    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// Update company name
    pub fn set_company(&mut self, company: String) {
        self.company = company;
        self.updated_at = Utc::now();
    }
}
