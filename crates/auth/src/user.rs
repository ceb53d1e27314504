//! User identity record.

use chrono::{DateTime, Utc};

use clubhouse_core::{DomainError, DomainResult, UserId};

use crate::Role;
use crate::password::MIN_PASSWORD_LEN;

/// A user account.
///
/// The credential hash never leaves this crate in serialized form; the API
/// layer maps users to wire shapes explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Registration input, validated before any hashing happens.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub avatar: Option<String>,
}

impl Registration {
    /// Normalize and validate the registration payload.
    ///
    /// Returns the normalized (trimmed, lowercased) email.
    pub fn validate(&self) -> DomainResult<String> {
        let email = self.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(email)
    }
}

impl User {
    /// Build a user from a validated registration and an already-hashed
    /// credential. Defaults the role to `player` when none is requested.
    pub fn from_registration(
        registration: &Registration,
        email: String,
        password_hash: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::new(),
            email,
            password_hash,
            full_name: registration
                .full_name
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            role: registration.role.unwrap_or(Role::Player),
            avatar: registration.avatar.clone(),
            created_at: now,
        }
    }
}
