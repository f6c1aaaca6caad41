//! Application-wide constants

pub const APP_NAME: &str = "satchel";
pub const ENV_PREFIX: &str = "SATCHEL";

pub const SESSION_COOKIE_NAME: &str = "satchel_session";
pub const DEFAULT_SESSION_DURATION_SECS: u64 = 30 * 60;
pub const DEFAULT_SESSION_TOKEN_LENGTH: usize = 32;
pub const MIN_SESSION_TOKEN_LENGTH: usize = 16;
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 60;

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_USERNAME_LENGTH: usize = 2;
pub const MAX_USERNAME_LENGTH: usize = 32;

pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 10;
pub const DEFAULT_LOG_FILTER: &str = "info,satchel_core=debug,satchel_api=debug,satchel_server=debug";
