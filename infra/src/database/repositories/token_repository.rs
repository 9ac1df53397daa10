//! SQLite implementation of the verification token repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

use lg_core::domain::entities::VerificationToken;
use lg_core::errors::DomainError;
use lg_core::repositories::TokenRepository;
use lg_shared::types::common::UserId;

use super::column;

pub struct SqliteTokenRepository {
    pool: SqlitePool,
}

impl SqliteTokenRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> Result<VerificationToken, DomainError> {
        Ok(VerificationToken {
            token: column(row, "token")?,
            user_id: column(row, "user_id")?,
            created_at: column(row, "created_at")?,
            short_url: column(row, "short_url")?,
            is_used: column(row, "is_used")?,
            is_bypassed: column(row, "is_bypassed")?,
            redeemed_at: column(row, "redeemed_at")?,
        })
    }
}

#[async_trait]
impl TokenRepository for SqliteTokenRepository {
    async fn insert(&self, token: VerificationToken) -> Result<VerificationToken, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO verification_tokens
                (token, user_id, created_at, short_url, is_used, is_bypassed, redeemed_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&token.token)
        .bind(token.user_id)
        .bind(token.created_at)
        .bind(&token.short_url)
        .bind(token.is_used)
        .bind(token.is_bypassed)
        .bind(token.redeemed_at)
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;
        Ok(token)
    }

    async fn find(&self, token: &str) -> Result<Option<VerificationToken>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT token, user_id, created_at, short_url, is_used, is_bypassed, redeemed_at
            FROM verification_tokens
            WHERE token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(DomainError::database)?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn mark_used_if_unused(
        &self,
        token: &str,
        user_id: UserId,
        redeemed_at: DateTime<Utc>,
        bypassed: bool,
    ) -> Result<bool, DomainError> {
        // The guarded UPDATE is the single-use compare-and-set: of any
        // concurrent redemptions, only one sees rows_affected == 1.
        let result = sqlx::query(
            r#"
            UPDATE verification_tokens
            SET is_used = 1, is_bypassed = ?, redeemed_at = ?
            WHERE token = ? AND user_id = ? AND is_used = 0
            "#,
        )
        .bind(bypassed)
        .bind(redeemed_at)
        .bind(token)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;

        Ok(result.rows_affected() == 1)
    }

    async fn set_short_url(&self, token: &str, short_url: &str) -> Result<(), DomainError> {
        sqlx::query("UPDATE verification_tokens SET short_url = ? WHERE token = ?")
            .bind(short_url)
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(DomainError::database)?;
        Ok(())
    }

    async fn log_bypass_attempt(
        &self,
        user_id: UserId,
        token: &str,
        elapsed_seconds: f64,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO bypass_logs (user_id, token, elapsed_seconds, logged_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(token)
        .bind(elapsed_seconds)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;
        Ok(())
    }

    async fn count_bypass_attempts_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bypass_logs WHERE logged_at > ?")
            .bind(cutoff)
            .fetch_one(&self.pool)
            .await
            .map_err(DomainError::database)?;
        Ok(count as u64)
    }

    async fn delete_stale_unused(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let result =
            sqlx::query("DELETE FROM verification_tokens WHERE is_used = 0 AND created_at < ?")
                .bind(cutoff)
                .execute(&self.pool)
                .await
                .map_err(DomainError::database)?;
        Ok(result.rows_affected() as usize)
    }
}
