//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Session not found")]
    SessionNotFound,

    #[error("Session expired")]
    SessionExpired,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Errors whose message is safe to show to the client.
    pub fn is_policy_violation(&self) -> bool {
        matches!(
            self,
            Self::PasswordTooShort { .. } | Self::UsernameTaken(_) | Self::ValidationError(_)
        )
    }
}
