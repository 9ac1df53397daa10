//! SQLite implementation of the analytics event log

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use lg_core::errors::DomainError;
use lg_core::repositories::EventLogRepository;
use lg_shared::types::common::UserId;

pub struct SqliteEventLogRepository {
    pool: SqlitePool,
}

impl SqliteEventLogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventLogRepository for SqliteEventLogRepository {
    async fn append(
        &self,
        event_type: &str,
        user_id: UserId,
        data: serde_json::Value,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO events (event_type, user_id, data, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(event_type)
        .bind(user_id)
        .bind(data.to_string())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;
        Ok(())
    }

    async fn prune_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM events WHERE created_at < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(DomainError::database)?;
        Ok(result.rows_affected() as usize)
    }
}
