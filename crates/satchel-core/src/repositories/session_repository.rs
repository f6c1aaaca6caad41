//! Session repository trait (port)

use async_trait::async_trait;

use crate::domain::Session;
use crate::error::DomainError;

#[derive(Debug, Clone)]
pub struct NewSession {
    pub token: String,
    pub expires_at: i64,
    pub user_id: String,
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: NewSession) -> Result<Session, DomainError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<Session>, DomainError>;
    /// Deleting an unknown token is not an error.
    async fn delete_by_token(&self, token: &str) -> Result<(), DomainError>;
    /// Deletes every session of `user_id` except the `except` token.
    async fn delete_by_user(&self, user_id: &str, except: Option<&str>) -> Result<u64, DomainError>;
    /// Deletes sessions with `expires_at < now`.
    async fn delete_expired(&self, now: i64) -> Result<u64, DomainError>;
}
