//! SQLite implementation of the user repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

use lg_core::domain::entities::User;
use lg_core::errors::DomainError;
use lg_core::repositories::UserRepository;
use lg_shared::types::common::UserId;

use super::column;

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> Result<User, DomainError> {
        Ok(User {
            user_id: column(row, "user_id")?,
            username: column(row, "username")?,
            full_name: column(row, "full_name")?,
            joined_at: column(row, "joined_at")?,
            last_active: column(row, "last_active")?,
            total_requests: column(row, "total_requests")?,
        })
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn record_contact(
        &self,
        user_id: UserId,
        username: Option<&str>,
        full_name: Option<&str>,
    ) -> Result<User, DomainError> {
        let now = Utc::now();

        // Upsert keeps existing metadata when the transport omits it on a
        // later contact.
        sqlx::query(
            r#"
            INSERT INTO users (user_id, username, full_name, joined_at, last_active, total_requests)
            VALUES (?, ?, ?, ?, ?, 1)
            ON CONFLICT(user_id) DO UPDATE SET
                username = COALESCE(excluded.username, users.username),
                full_name = COALESCE(excluded.full_name, users.full_name),
                last_active = excluded.last_active,
                total_requests = users.total_requests + 1
            "#,
        )
        .bind(user_id)
        .bind(username)
        .bind(full_name)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;

        match self.find_by_id(user_id).await? {
            Some(user) => Ok(user),
            None => Err(DomainError::Internal {
                message: format!("user {} missing immediately after upsert", user_id),
            }),
        }
    }

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, username, full_name, joined_at, last_active, total_requests
            FROM users
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DomainError::database)?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(DomainError::database)?;
        Ok(count as u64)
    }
}
