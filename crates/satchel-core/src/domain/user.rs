//! User domain entity

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use satchel_shared::constants::{MAX_USERNAME_LENGTH, MIN_USERNAME_LENGTH};

use crate::error::DomainError;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid username regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(DomainError::ValidationError(format!("unknown role: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// Seconds since the epoch
    pub created_at: i64,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Nobody can delete their own account.
    pub fn is_deletable_by(&self, actor_id: &str) -> bool {
        self.id != actor_id
    }
}

/// Usernames are 2 to 32 characters of ASCII letters, digits, `_` or `-`.
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    if username.is_empty() {
        return Err(DomainError::ValidationError("username is required".into()));
    }
    let len = username.chars().count();
    if len < MIN_USERNAME_LENGTH || len > MAX_USERNAME_LENGTH {
        return Err(DomainError::ValidationError(format!(
            "username must be between {} and {} characters",
            MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH
        )));
    }
    if !USERNAME_RE.is_match(username) {
        return Err(DomainError::ValidationError(
            "username may only contain letters, digits, '_' and '-'".into(),
        ));
    }
    Ok(())
}
