//! SQLite session repository

use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use satchel_core::domain::Session;
use satchel_core::error::DomainError;
use satchel_core::repositories::{NewSession, SessionRepository};

use super::db_error;

pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SessionRow {
    token: String,
    expires_at: i64,
    user_id: String,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            token: row.token,
            expires_at: row.expires_at,
            user_id: row.user_id,
        }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn create(&self, session: NewSession) -> Result<Session, DomainError> {
        sqlx::query("INSERT INTO sessions (token, expires_at, user_id) VALUES (?, ?, ?)")
            .bind(&session.token)
            .bind(session.expires_at)
            .bind(&session.user_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("creating session"))?;

        Ok(Session {
            token: session.token,
            expires_at: session.expires_at,
            user_id: session.user_id,
        })
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Session>, DomainError> {
        let row: Option<SessionRow> =
            sqlx::query_as("SELECT token, expires_at, user_id FROM sessions WHERE token = ?")
                .bind(token)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("finding session"))?;

        Ok(row.map(Session::from))
    }

    async fn delete_by_token(&self, token: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting session"))?;
        Ok(())
    }

    async fn delete_by_user(&self, user_id: &str, except: Option<&str>) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE user_id = ? AND (? IS NULL OR token <> ?)
            "#,
        )
        .bind(user_id)
        .bind(except)
        .bind(except)
        .execute(&self.pool)
        .await
        .map_err(db_error("deleting user sessions"))?;

        Ok(result.rows_affected())
    }

    async fn delete_expired(&self, now: i64) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting expired sessions"))?;

        let removed = result.rows_affected();
        debug!(removed, now, "expired session sweep");
        Ok(removed)
    }
}
