//! SQLite user repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, SqlitePool};
use tracing::{error, info};
use uuid::Uuid;

use satchel_core::domain::{Role, User};
use satchel_core::error::DomainError;
use satchel_core::repositories::{NewUser, UserRepository};

use super::{db_error, is_unique_violation};

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    created_at: i64,
    username: String,
    password_hash: String,
    role: String,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: Role = row.role.parse().map_err(|_| {
            error!("Unknown role '{}' stored for user {}", row.role, row.id);
            DomainError::DatabaseError(format!("unknown role: {}", row.role))
        })?;

        Ok(User {
            id: row.id,
            created_at: row.created_at,
            username: row.username,
            password_hash: row.password_hash,
            role,
        })
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let created = User {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now().timestamp(),
            username: user.username,
            password_hash: user.password_hash,
            role: user.role,
        };

        sqlx::query(
            r#"
            INSERT INTO users (id, created_at, username, password_hash, role)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&created.id)
        .bind(created.created_at)
        .bind(&created.username)
        .bind(&created.password_hash)
        .bind(created.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::UsernameTaken(created.username.clone())
            } else {
                db_error("creating user")(e)
            }
        })?;

        info!("User created: {}", created.id);
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, created_at, username, password_hash, role
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding user by id"))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, created_at, username, password_hash, role
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding user by username"))?;

        row.map(User::try_from).transpose()
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting users"))
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, created_at, username, password_hash, role
            FROM users
            ORDER BY username
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing users"))?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn update_password_hash(&self, id: &str, password_hash: &str) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("updating password"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound);
        }
        Ok(())
    }

    async fn update_username(&self, id: &str, username: &str) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET username = ? WHERE id = ?")
            .bind(username)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::UsernameTaken(username.to_string())
                } else {
                    db_error("updating username")(e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting user"))?;

        info!("User deleted: {}", id);
        Ok(())
    }
}
