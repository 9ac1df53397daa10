//! SQLite implementation of the content link repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

use lg_core::domain::entities::{ContentLink, LinkKind};
use lg_core::errors::DomainError;
use lg_core::repositories::LinkRepository;
use lg_shared::types::common::MessageId;

use super::column;

pub struct SqliteLinkRepository {
    pool: SqlitePool,
}

impl SqliteLinkRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> Result<ContentLink, DomainError> {
        let link_type: String = column(row, "link_type")?;
        let channel_id = column(row, "channel_id")?;
        let start_msg_id: MessageId = column(row, "start_msg_id")?;

        let kind = match link_type.as_str() {
            "single" => LinkKind::Single {
                channel_id,
                message_id: start_msg_id,
            },
            "batch" => {
                let end_msg_id: Option<MessageId> = column(row, "end_msg_id")?;
                LinkKind::Batch {
                    channel_id,
                    start_msg_id,
                    end_msg_id: end_msg_id.ok_or_else(|| DomainError::Internal {
                        message: "batch link row missing end_msg_id".to_string(),
                    })?,
                }
            }
            other => {
                return Err(DomainError::Internal {
                    message: format!("unknown link_type '{}' in links table", other),
                });
            }
        };

        Ok(ContentLink {
            link_id: column(row, "link_id")?,
            kind,
            created_by: column(row, "created_by")?,
            created_at: column(row, "created_at")?,
            uses: column(row, "uses")?,
            last_used: column(row, "last_used")?,
        })
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn insert(&self, link: ContentLink) -> Result<ContentLink, DomainError> {
        let (link_type, channel_id, start_msg_id, end_msg_id) = match link.kind {
            LinkKind::Single {
                channel_id,
                message_id,
            } => ("single", channel_id, message_id, None),
            LinkKind::Batch {
                channel_id,
                start_msg_id,
                end_msg_id,
            } => ("batch", channel_id, start_msg_id, Some(end_msg_id)),
        };

        sqlx::query(
            r#"
            INSERT INTO links
                (link_id, link_type, channel_id, start_msg_id, end_msg_id,
                 created_by, created_at, uses, last_used)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&link.link_id)
        .bind(link_type)
        .bind(channel_id)
        .bind(start_msg_id)
        .bind(end_msg_id)
        .bind(link.created_by)
        .bind(link.created_at)
        .bind(link.uses)
        .bind(link.last_used)
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;

        Ok(link)
    }

    async fn find(&self, link_id: &str) -> Result<Option<ContentLink>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT link_id, link_type, channel_id, start_msg_id, end_msg_id,
                   created_by, created_at, uses, last_used
            FROM links
            WHERE link_id = ?
            "#,
        )
        .bind(link_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DomainError::database)?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn record_use(&self, link_id: &str, now: DateTime<Utc>) -> Result<(), DomainError> {
        sqlx::query("UPDATE links SET uses = uses + 1, last_used = ? WHERE link_id = ?")
            .bind(now)
            .bind(link_id)
            .execute(&self.pool)
            .await
            .map_err(DomainError::database)?;
        Ok(())
    }

    async fn delete(&self, link_id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM links WHERE link_id = ?")
            .bind(link_id)
            .execute(&self.pool)
            .await
            .map_err(DomainError::database)?;
        Ok(result.rows_affected() > 0)
    }

    async fn recent(&self, limit: u32) -> Result<Vec<ContentLink>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT link_id, link_type, channel_id, start_msg_id, end_msg_id,
                   created_by, created_at, uses, last_used
            FROM links
            ORDER BY created_at DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::database)?;

        rows.iter().map(Self::map_row).collect()
    }
}
