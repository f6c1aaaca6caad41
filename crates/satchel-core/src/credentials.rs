//! Sources of the initial admin credentials

use crate::error::DomainError;
use crate::services::CreateUserParams;

/// Consulted by [`AuthService::bootstrap`](crate::AuthService::bootstrap)
/// only when no user exists yet.
pub trait CredentialsProvider: Send + Sync {
    fn credentials(&self) -> Result<CreateUserParams, DomainError>;
}

/// Fixed credentials, typically read from configuration.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn credentials(&self) -> Result<CreateUserParams, DomainError> {
        Ok(CreateUserParams::new(&self.username, &self.password))
    }
}
