//! Authentication service: sign-in, sessions, password policy and
//! user administration.

use std::sync::Arc;

use chrono::Duration as ChronoDuration;
use once_cell::sync::OnceCell;
use tracing::{debug, error, info, warn};

use satchel_security::{generate_session_token, PasswordHashing, PasswordService};
use satchel_shared::time::unix_seconds;

use crate::clock::{Clock, SystemClock};
use crate::config::AuthConfig;
use crate::credentials::CredentialsProvider;
use crate::domain::{validate_username, Role, Session, User};
use crate::error::DomainError;
use crate::repositories::{NewSession, NewUser, SessionRepository, UserRepository};
use crate::tasks::PeriodicTask;

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl CreateUserParams {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role: Role::default(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

#[derive(Debug, Clone)]
pub struct UpdatePasswordParams {
    pub user_id: String,
    pub password: String,
    /// Session that survives revocation, usually the caller's own.
    pub keep_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SignInResult {
    pub user: User,
    pub session: Session,
}

/// Verified against when the username does not exist, so both sign-in
/// failures cost one hash verification.
const DUMMY_PASSWORD: &str = "satchel-unknown-user";

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    hasher: Arc<dyn PasswordHashing>,
    clock: Arc<dyn Clock>,
    config: AuthConfig,
    // Hashed with the configured hasher on first use
    dummy_hash: OnceCell<Option<String>>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        config: AuthConfig,
    ) -> Self {
        Self {
            users,
            sessions,
            hasher: Arc::new(PasswordService::new()),
            clock: Arc::new(SystemClock),
            config,
            dummy_hash: OnceCell::new(),
        }
    }

    pub fn with_hasher(mut self, hasher: Arc<dyn PasswordHashing>) -> Self {
        self.hasher = hasher;
        self.dummy_hash = OnceCell::new();
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn now(&self) -> i64 {
        unix_seconds(self.clock.now())
    }

    fn check_password_policy(&self, password: &str) -> Result<(), DomainError> {
        let min = self.config.min_password_length;
        if password.chars().count() < min {
            return Err(DomainError::PasswordTooShort { min });
        }
        Ok(())
    }

    // Argon2 is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::InternalError(format!("hashing task failed: {}", e)))?
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))
    }

    async fn verify_password(&self, password: &str, hash: String) -> Result<bool, DomainError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| DomainError::InternalError(format!("verification task failed: {}", e)))
    }

    async fn dummy_hash(&self) -> Option<String> {
        if let Some(hash) = self.dummy_hash.get() {
            return hash.clone();
        }
        let hash = match self.hash_password(DUMMY_PASSWORD).await {
            Ok(hash) => Some(hash),
            Err(e) => {
                error!(error = %e, "could not prepare dummy password hash");
                None
            }
        };
        self.dummy_hash.get_or_init(|| hash).clone()
    }

    /// Creates the first admin when the user table is empty.
    ///
    /// Returns `None` without consulting `provider` if any user exists, so
    /// calling it on every start is safe.
    pub async fn bootstrap(
        &self,
        provider: &dyn CredentialsProvider,
    ) -> Result<Option<User>, DomainError> {
        let count = self.users.count().await?;
        if count > 0 {
            debug!(users = count, "bootstrap skipped, users already exist");
            return Ok(None);
        }

        let params = provider.credentials()?.with_role(Role::Admin);
        let user = self.create_user(params).await?;

        info!(user_id = %user.id, username = %user.username, "initial admin created");
        Ok(Some(user))
    }

    /// Unknown usernames and wrong passwords fail identically, in result
    /// and in work done: both run one password verification.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<SignInResult, DomainError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            if let Some(dummy) = self.dummy_hash().await {
                self.verify_password(password, dummy).await?;
            }
            warn!("Sign-in rejected for username: {}", username);
            return Err(DomainError::InvalidCredentials);
        };

        if !self
            .verify_password(password, user.password_hash.clone())
            .await?
        {
            warn!("Sign-in rejected for username: {}", username);
            return Err(DomainError::InvalidCredentials);
        }

        let duration = ChronoDuration::from_std(self.config.session_duration)
            .map_err(|e| DomainError::InternalError(e.to_string()))?;
        let expires = self
            .clock
            .now()
            .checked_add_signed(duration)
            .ok_or_else(|| DomainError::InternalError("session expiry out of range".into()))?;
        let expires_at = unix_seconds(expires);

        let session = self
            .sessions
            .create(NewSession {
                token: generate_session_token(self.config.session_token_length),
                expires_at,
                user_id: user.id.clone(),
            })
            .await?;

        info!(user_id = %user.id, expires_at, "session created");
        Ok(SignInResult { user, session })
    }

    pub async fn sign_out(&self, token: &str) -> Result<(), DomainError> {
        self.sessions.delete_by_token(token).await
    }

    /// Expired sessions stay in the store until sign-out or the cleanup sweep.
    pub async fn verify_token(&self, token: &str) -> Result<Session, DomainError> {
        let session = self
            .sessions
            .find_by_token(token)
            .await?
            .ok_or(DomainError::SessionNotFound)?;

        if session.is_expired_at(self.now()) {
            return Err(DomainError::SessionExpired);
        }
        Ok(session)
    }

    pub async fn update_password(&self, params: UpdatePasswordParams) -> Result<(), DomainError> {
        self.check_password_policy(&params.password)?;
        let hash = self.hash_password(&params.password).await?;
        self.users
            .update_password_hash(&params.user_id, &hash)
            .await?;

        if self.config.revoke_sessions_on_password_change {
            let revoked = self
                .sessions
                .delete_by_user(&params.user_id, params.keep_token.as_deref())
                .await?;
            info!(user_id = %params.user_id, revoked, "password changed, other sessions revoked");
        } else {
            info!(user_id = %params.user_id, "password changed");
        }
        Ok(())
    }

    pub async fn update_username(&self, user_id: &str, username: &str) -> Result<(), DomainError> {
        validate_username(username)?;
        self.users.update_username(user_id, username).await?;
        info!(user_id, username, "username changed");
        Ok(())
    }

    pub async fn create_user(&self, params: CreateUserParams) -> Result<User, DomainError> {
        validate_username(&params.username)?;
        self.check_password_policy(&params.password)?;
        let password_hash = self.hash_password(&params.password).await?;

        let user = self
            .users
            .create(NewUser {
                username: params.username,
                password_hash,
                role: params.role,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, role = %user.role, "user created");
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.users.list().await
    }

    pub async fn get_user_by_id(&self, id: &str) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound)
    }

    /// Revokes the user's sessions, then deletes the account.
    pub async fn delete_user_by_id(&self, id: &str) -> Result<(), DomainError> {
        let revoked = self.sessions.delete_by_user(id, None).await?;
        self.users.delete_by_id(id).await?;
        info!(user_id = id, revoked, "user deleted");
        Ok(())
    }

    /// One cleanup pass. Returns how many sessions were removed.
    pub async fn delete_expired_sessions(&self) -> Result<u64, DomainError> {
        self.sessions.delete_expired(self.now()).await
    }

    /// Runs [`AuthService::delete_expired_sessions`] every
    /// `cleanup_interval`. A failed pass is logged and the next tick runs
    /// as usual.
    pub fn spawn_session_cleanup(self: &Arc<Self>) -> PeriodicTask {
        let service = Arc::clone(self);
        PeriodicTask::spawn("session-cleanup", self.config.cleanup_interval, move || {
            let service = Arc::clone(&service);
            async move {
                match service.delete_expired_sessions().await {
                    Ok(0) => {}
                    Ok(removed) => info!(removed, "expired sessions removed"),
                    Err(e) => error!(error = %e, "expired session cleanup failed"),
                }
            }
        })
    }
}
