//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::*;
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub server: ServerSettings,
    pub telemetry: TelemetrySettings,
    #[serde(default)]
    pub bootstrap: BootstrapSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub cookie_name: String,
    pub session_duration_secs: u64,
    pub session_token_length: usize,
    pub min_password_length: usize,
    pub cleanup_interval_secs: u64,
    pub revoke_sessions_on_password_change: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub shutdown_grace_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    /// `json` or `pretty`
    pub format: String,
    pub log_dir: Option<String>,
}

/// Seed for the first admin account. When either field is missing the
/// server falls back to an interactive prompt.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BootstrapSettings {
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl BootstrapSettings {
    pub fn seed(&self) -> Option<(&str, &str)> {
        match (&self.admin_username, &self.admin_password) {
            (Some(username), Some(password)) => Some((username.as_str(), password.as_str())),
            _ => None,
        }
    }
}

impl AppConfig {
    /// Defaults, then `config/default`, then `config/{APP_ENV}`, then
    /// `SATCHEL__SECTION__KEY` variables (a `.env` file is read first).
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config: Self = Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would only fail later, at request time.
    pub fn validate(&self) -> Result<(), AppError> {
        let auth = &self.auth;
        if auth.cookie_name.is_empty()
            || !auth
                .cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(AppError::invalid(
                "auth.cookie_name",
                "must be non-empty and contain only [A-Za-z0-9_-]",
            ));
        }
        if auth.session_duration_secs == 0 {
            return Err(AppError::invalid("auth.session_duration_secs", "must be positive"));
        }
        if auth.cleanup_interval_secs == 0 {
            return Err(AppError::invalid("auth.cleanup_interval_secs", "must be positive"));
        }
        if auth.session_token_length < MIN_SESSION_TOKEN_LENGTH {
            return Err(AppError::invalid(
                "auth.session_token_length",
                format!("must be at least {} bytes", MIN_SESSION_TOKEN_LENGTH),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(AppError::invalid("database.max_connections", "must be positive"));
        }
        if !matches!(self.telemetry.format.as_str(), "json" | "pretty") {
            return Err(AppError::invalid("telemetry.format", "expected `json` or `pretty`"));
        }
        Ok(())
    }

    /// Built-in defaults only. Useful for tests and as the base of [`AppConfig::load`].
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 3000)?
            .set_default("app.name", APP_NAME)?
            .set_default("database.url", "sqlite://satchel.db")?
            .set_default("database.max_connections", 5)?
            .set_default("auth.cookie_name", SESSION_COOKIE_NAME)?
            .set_default("auth.session_duration_secs", DEFAULT_SESSION_DURATION_SECS)?
            .set_default("auth.session_token_length", DEFAULT_SESSION_TOKEN_LENGTH as u64)?
            .set_default("auth.min_password_length", MIN_PASSWORD_LENGTH as u64)?
            .set_default("auth.cleanup_interval_secs", DEFAULT_CLEANUP_INTERVAL_SECS)?
            .set_default("auth.revoke_sessions_on_password_change", true)?
            .set_default("server.shutdown_grace_secs", DEFAULT_SHUTDOWN_GRACE_SECS)?
            .set_default("telemetry.format", "pretty")
    }
}
