//! Mock repositories for testing

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use satchel_core::repositories::{NewSession, NewUser, SessionRepository, UserRepository};
use satchel_core::{DomainError, Session, User};

/// In-memory user repository for testing
#[derive(Default, Clone)]
pub struct MockUserRepository {
    users: Arc<DashMap<String, User>>,
}

#[allow(dead_code)]
impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    fn username_taken(&self, username: &str, except_id: Option<&str>) -> bool {
        self.users
            .iter()
            .any(|u| u.username == username && Some(u.id.as_str()) != except_id)
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        if self.username_taken(&user.username, None) {
            return Err(DomainError::UsernameTaken(user.username));
        }
        let row = User {
            id: Uuid::new_v4().to_string(),
            created_at: 0,
            username: user.username,
            password_hash: user.password_hash,
            role: user.role,
        };
        self.users.insert(row.id.clone(), row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.get(id).map(|r| r.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|r| r.value().clone()))
    }

    async fn count(&self) -> Result<i64, DomainError> {
        Ok(self.users.len() as i64)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let mut users: Vec<User> = self.users.iter().map(|r| r.value().clone()).collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn update_password_hash(&self, id: &str, password_hash: &str) -> Result<(), DomainError> {
        let mut user = self.users.get_mut(id).ok_or(DomainError::UserNotFound)?;
        user.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn update_username(&self, id: &str, username: &str) -> Result<(), DomainError> {
        if self.username_taken(username, Some(id)) {
            return Err(DomainError::UsernameTaken(username.to_string()));
        }
        let mut user = self.users.get_mut(id).ok_or(DomainError::UserNotFound)?;
        user.username = username.to_string();
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), DomainError> {
        self.users.remove(id);
        Ok(())
    }
}

/// In-memory session repository for testing
#[derive(Default, Clone)]
pub struct MockSessionRepository {
    sessions: Arc<DashMap<String, Session>>,
}

#[allow(dead_code)]
impl MockSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test session directly
    pub fn insert_session(&self, token: &str, expires_at: i64, user_id: &str) {
        self.sessions.insert(
            token.to_string(),
            Session {
                token: token.to_string(),
                expires_at,
                user_id: user_id.to_string(),
            },
        );
    }

    pub fn contains(&self, token: &str) -> bool {
        self.sessions.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn create(&self, session: NewSession) -> Result<Session, DomainError> {
        let row = Session {
            token: session.token,
            expires_at: session.expires_at,
            user_id: session.user_id,
        };
        self.sessions.insert(row.token.clone(), row.clone());
        Ok(row)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.get(token).map(|r| r.value().clone()))
    }

    async fn delete_by_token(&self, token: &str) -> Result<(), DomainError> {
        self.sessions.remove(token);
        Ok(())
    }

    async fn delete_by_user(&self, user_id: &str, except: Option<&str>) -> Result<u64, DomainError> {
        let before = self.sessions.len();
        self.sessions
            .retain(|token, s| s.user_id != user_id || Some(token.as_str()) == except);
        Ok((before - self.sessions.len()) as u64)
    }

    async fn delete_expired(&self, now: i64) -> Result<u64, DomainError> {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| s.expires_at >= now);
        Ok((before - self.sessions.len()) as u64)
    }
}

/// Session store whose cleanup always fails, counting the attempts.
#[derive(Default, Clone)]
pub struct FailingSessionRepository {
    pub cleanup_attempts: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl FailingSessionRepository {
    pub fn attempts(&self) -> usize {
        self.cleanup_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionRepository for FailingSessionRepository {
    async fn create(&self, _: NewSession) -> Result<Session, DomainError> {
        Err(DomainError::DatabaseError("unavailable".into()))
    }

    async fn find_by_token(&self, _: &str) -> Result<Option<Session>, DomainError> {
        Err(DomainError::DatabaseError("unavailable".into()))
    }

    async fn delete_by_token(&self, _: &str) -> Result<(), DomainError> {
        Err(DomainError::DatabaseError("unavailable".into()))
    }

    async fn delete_by_user(&self, _: &str, _: Option<&str>) -> Result<u64, DomainError> {
        Err(DomainError::DatabaseError("unavailable".into()))
    }

    async fn delete_expired(&self, _: i64) -> Result<u64, DomainError> {
        self.cleanup_attempts.fetch_add(1, Ordering::SeqCst);
        Err(DomainError::DatabaseError("unavailable".into()))
    }
}
