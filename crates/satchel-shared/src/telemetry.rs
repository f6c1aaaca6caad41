//! Telemetry setup

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::TelemetrySettings;
use crate::constants::DEFAULT_LOG_FILTER;
use crate::error::AppError;

/// Install the global subscriber. `RUST_LOG` wins over the built-in filter.
pub fn init_telemetry(settings: &TelemetrySettings) -> Result<(), AppError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let file_appender = match &settings.log_dir {
        Some(dir) => Some(
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("satchel")
                .filename_suffix("log")
                .build(dir)
                .map_err(|e| AppError::Telemetry(e.to_string()))?,
        ),
        None => None,
    };

    let result = match settings.format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_target(true))
            .with(file_appender.map(|w| fmt::layer().json().with_writer(w)))
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(true))
            .with(file_appender.map(|w| fmt::layer().with_ansi(false).with_writer(w)))
            .try_init(),
    };

    result.map_err(|e| AppError::Telemetry(e.to_string()))
}
