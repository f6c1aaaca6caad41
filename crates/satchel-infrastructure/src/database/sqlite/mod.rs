//! SQLite repository implementations

pub mod session_repo_impl;
pub mod user_repo_impl;

pub use session_repo_impl::SqliteSessionRepository;
pub use user_repo_impl::SqliteUserRepository;

use satchel_core::error::DomainError;
use tracing::error;

/// Logs the failure with `context` and hides the driver error behind
/// `DatabaseError`.
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| {
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
