//! SQLite implementation of the force-join channel repository

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

use lg_core::domain::entities::ForceJoinChannel;
use lg_core::errors::DomainError;
use lg_core::repositories::ChannelRepository;
use lg_shared::types::common::ChannelId;

use super::column;

pub struct SqliteChannelRepository {
    pool: SqlitePool,
}

impl SqliteChannelRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> Result<ForceJoinChannel, DomainError> {
        Ok(ForceJoinChannel {
            channel_id: column(row, "channel_id")?,
            username: column(row, "username")?,
            title: column(row, "title")?,
            invite_link: column(row, "invite_link")?,
            is_active: column(row, "is_active")?,
            required: column(row, "required")?,
            added_at: column(row, "added_at")?,
        })
    }
}

#[async_trait]
impl ChannelRepository for SqliteChannelRepository {
    async fn upsert(&self, channel: ForceJoinChannel) -> Result<(), DomainError> {
        // Identity is the numeric id or the handle, whichever is set;
        // replace-then-insert keeps one row per identity.
        let mut tx = self.pool.begin().await.map_err(DomainError::database)?;

        sqlx::query(
            r#"
            DELETE FROM force_join_channels
            WHERE (channel_id IS NOT NULL AND channel_id = ?)
               OR (username IS NOT NULL AND username = ?)
            "#,
        )
        .bind(channel.channel_id)
        .bind(&channel.username)
        .execute(&mut *tx)
        .await
        .map_err(DomainError::database)?;

        sqlx::query(
            r#"
            INSERT INTO force_join_channels
                (channel_id, username, title, invite_link, is_active, required, added_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(channel.channel_id)
        .bind(&channel.username)
        .bind(&channel.title)
        .bind(&channel.invite_link)
        .bind(channel.is_active)
        .bind(channel.required)
        .bind(channel.added_at)
        .execute(&mut *tx)
        .await
        .map_err(DomainError::database)?;

        tx.commit().await.map_err(DomainError::database)?;
        Ok(())
    }

    async fn remove(&self, channel_id: ChannelId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM force_join_channels WHERE channel_id = ?")
            .bind(channel_id)
            .execute(&self.pool)
            .await
            .map_err(DomainError::database)?;
        Ok(result.rows_affected() > 0)
    }

    async fn active_channels(&self) -> Result<Vec<ForceJoinChannel>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT channel_id, username, title, invite_link, is_active, required, added_at
            FROM force_join_channels
            WHERE is_active = 1
            ORDER BY added_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::database)?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn all_channels(&self) -> Result<Vec<ForceJoinChannel>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT channel_id, username, title, invite_link, is_active, required, added_at
            FROM force_join_channels
            ORDER BY added_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::database)?;

        rows.iter().map(Self::map_row).collect()
    }
}
