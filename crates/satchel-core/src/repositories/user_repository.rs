//! User repository trait (port)

use async_trait::async_trait;

use crate::domain::{Role, User};
use crate::error::DomainError;

/// Row to insert. The store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// `UsernameTaken` when the username already exists.
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
    /// Ordered by username.
    async fn list(&self) -> Result<Vec<User>, DomainError>;
    async fn update_password_hash(&self, id: &str, password_hash: &str) -> Result<(), DomainError>;
    async fn update_username(&self, id: &str, username: &str) -> Result<(), DomainError>;
    async fn delete_by_id(&self, id: &str) -> Result<(), DomainError>;
}
