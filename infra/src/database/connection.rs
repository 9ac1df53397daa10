//! Database connection pool management
//!
//! Connection pooling over SQLx with SQLite. The schema is created on
//! startup with idempotent DDL rather than a migration directory; the store
//! is a single embedded file.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use lg_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// SQLite connection pool wrapper.
#[derive(Clone)]
pub struct DatabasePool {
    pool: SqlitePool,
}

impl DatabasePool {
    /// Create a new connection pool from configuration.
    ///
    /// The database file is created if missing; WAL mode keeps readers from
    /// blocking the writer.
    pub async fn new(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        tracing::info!(
            url = %config.url,
            max_connections = config.max_connections,
            "Creating database connection pool"
        );

        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the underlying SQLx pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create every table and index the store needs. Idempotent.
    pub async fn init_schema(&self) -> Result<(), InfrastructureError> {
        // Prepared statements take one statement at a time.
        const DDL: &[&str] = &[
            r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id        INTEGER PRIMARY KEY,
                username       TEXT,
                full_name      TEXT,
                joined_at      TEXT NOT NULL,
                last_active    TEXT,
                total_requests INTEGER NOT NULL DEFAULT 0
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                session_id  TEXT PRIMARY KEY,
                user_id     INTEGER NOT NULL,
                start_time  TEXT NOT NULL,
                expiry_time TEXT NOT NULL,
                is_active   INTEGER NOT NULL DEFAULT 1
            )
            "#,
            r#"
            CREATE INDEX IF NOT EXISTS idx_sessions_user
                ON sessions (user_id, is_active)
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS verification_tokens (
                token       TEXT PRIMARY KEY,
                user_id     INTEGER NOT NULL,
                created_at  TEXT NOT NULL,
                short_url   TEXT,
                is_used     INTEGER NOT NULL DEFAULT 0,
                is_bypassed INTEGER NOT NULL DEFAULT 0,
                redeemed_at TEXT
            )
            "#,
            r#"
            CREATE INDEX IF NOT EXISTS idx_tokens_user
                ON verification_tokens (user_id)
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS bypass_logs (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id         INTEGER NOT NULL,
                token           TEXT NOT NULL,
                elapsed_seconds REAL NOT NULL,
                logged_at       TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS force_join_channels (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                channel_id  INTEGER,
                username    TEXT,
                title       TEXT NOT NULL,
                invite_link TEXT NOT NULL,
                is_active   INTEGER NOT NULL DEFAULT 1,
                required    INTEGER NOT NULL DEFAULT 1,
                added_at    TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS links (
                link_id      TEXT PRIMARY KEY,
                link_type    TEXT NOT NULL,
                channel_id   INTEGER NOT NULL,
                start_msg_id INTEGER NOT NULL,
                end_msg_id   INTEGER,
                created_by   INTEGER NOT NULL,
                created_at   TEXT NOT NULL,
                uses         INTEGER NOT NULL DEFAULT 0,
                last_used    TEXT
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS events (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                event_type TEXT NOT NULL,
                user_id    INTEGER NOT NULL,
                data       TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
            r#"
            CREATE INDEX IF NOT EXISTS idx_events_created
                ON events (created_at)
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
            "#,
        ];

        for statement in DDL {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::info!("Database schema ready");
        Ok(())
    }

    /// Check connectivity with a trivial query.
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let row: (i32,) = sqlx::query_as("SELECT 1").fetch_one(&self.pool).await?;
        Ok(row.0 == 1)
    }

    /// Close all connections. Call during shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection pool closed");
    }
}
