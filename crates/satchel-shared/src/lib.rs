//! # Satchel Shared
//!
//! Configuration, telemetry, constants and common error types shared by
//! every Satchel crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;
pub mod time;

pub use config::AppConfig;
pub use error::AppError;
