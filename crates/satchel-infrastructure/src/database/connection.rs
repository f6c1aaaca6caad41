//! Database connection pool

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::info;

use satchel_shared::config::DatabaseSettings;

/// Opens the pool and applies pending migrations.
///
/// In-memory databases live as long as their connection, so those
/// connections are never recycled.
pub async fn create_pool(settings: &DatabaseSettings) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = settings.url.contains(":memory:");

    let mut options = SqliteConnectOptions::from_str(&settings.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(settings.max_connections.max(1))
        .acquire_timeout(Duration::from_secs(3));
    if in_memory {
        pool_options = pool_options.idle_timeout(None).max_lifetime(None);
    }

    info!("Connecting to database: {}", settings.url);
    let pool = pool_options.connect_with(options).await?;

    run_migrations(&pool).await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Migrations complete");
    Ok(())
}
