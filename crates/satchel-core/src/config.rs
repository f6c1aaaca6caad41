//! Auth policy passed to [`AuthService`](crate::AuthService)

use std::time::Duration;

use satchel_shared::config::AuthSettings;
use satchel_shared::constants::{
    DEFAULT_CLEANUP_INTERVAL_SECS, DEFAULT_SESSION_DURATION_SECS, DEFAULT_SESSION_TOKEN_LENGTH,
    MIN_PASSWORD_LENGTH,
};

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub session_duration: Duration,
    /// Random bytes per token, before base64.
    pub session_token_length: usize,
    pub min_password_length: usize,
    pub cleanup_interval: Duration,
    /// Drop the user's other sessions after a password change.
    pub revoke_sessions_on_password_change: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_duration: Duration::from_secs(DEFAULT_SESSION_DURATION_SECS),
            session_token_length: DEFAULT_SESSION_TOKEN_LENGTH,
            min_password_length: MIN_PASSWORD_LENGTH,
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
            revoke_sessions_on_password_change: true,
        }
    }
}

impl From<&AuthSettings> for AuthConfig {
    fn from(settings: &AuthSettings) -> Self {
        Self {
            session_duration: Duration::from_secs(settings.session_duration_secs),
            session_token_length: settings.session_token_length,
            min_password_length: settings.min_password_length,
            cleanup_interval: Duration::from_secs(settings.cleanup_interval_secs),
            revoke_sessions_on_password_change: settings.revoke_sessions_on_password_change,
        }
    }
}
