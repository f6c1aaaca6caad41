//! Startup errors: configuration and telemetry

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid setting `{key}`: {reason}")]
    InvalidSetting { key: &'static str, reason: String },

    #[error("Telemetry error: {0}")]
    Telemetry(String),
}

impl AppError {
    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        AppError::InvalidSetting {
            key,
            reason: reason.into(),
        }
    }
}
