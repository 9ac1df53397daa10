//! SQLite implementation of the session repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

use lg_core::domain::entities::Session;
use lg_core::errors::DomainError;
use lg_core::repositories::SessionRepository;
use lg_shared::types::common::UserId;

use super::column;

pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> Result<Session, DomainError> {
        Ok(Session {
            session_id: column(row, "session_id")?,
            user_id: column(row, "user_id")?,
            start_time: column(row, "start_time")?,
            expiry_time: column(row, "expiry_time")?,
            is_active: column(row, "is_active")?,
        })
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn insert_exclusive(&self, session: Session) -> Result<Session, DomainError> {
        // Deactivation and insertion commit together or not at all; the
        // at-most-one-active invariant rides on this transaction.
        let mut tx = self.pool.begin().await.map_err(DomainError::database)?;

        sqlx::query("UPDATE sessions SET is_active = 0 WHERE user_id = ? AND is_active = 1")
            .bind(session.user_id)
            .execute(&mut *tx)
            .await
            .map_err(DomainError::database)?;

        sqlx::query(
            r#"
            INSERT INTO sessions (session_id, user_id, start_time, expiry_time, is_active)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&session.session_id)
        .bind(session.user_id)
        .bind(session.start_time)
        .bind(session.expiry_time)
        .bind(session.is_active)
        .execute(&mut *tx)
        .await
        .map_err(DomainError::database)?;

        tx.commit().await.map_err(DomainError::database)?;
        Ok(session)
    }

    async fn find_active(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT session_id, user_id, start_time, expiry_time, is_active
            FROM sessions
            WHERE user_id = ? AND is_active = 1 AND expiry_time > ?
            ORDER BY start_time DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(DomainError::database)?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn deactivate_for_user(&self, user_id: UserId) -> Result<usize, DomainError> {
        let result =
            sqlx::query("UPDATE sessions SET is_active = 0 WHERE user_id = ? AND is_active = 1")
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(DomainError::database)?;
        Ok(result.rows_affected() as usize)
    }

    async fn deactivate_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let result =
            sqlx::query("UPDATE sessions SET is_active = 0 WHERE is_active = 1 AND expiry_time <= ?")
                .bind(now)
                .execute(&self.pool)
                .await
                .map_err(DomainError::database)?;
        Ok(result.rows_affected() as usize)
    }

    async fn count_active(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sessions WHERE is_active = 1 AND expiry_time > ?",
        )
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(DomainError::database)?;
        Ok(count as u64)
    }
}
