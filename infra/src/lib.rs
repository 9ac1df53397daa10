//! # Infrastructure Layer
//!
//! Concrete implementations of the core layer's collaborator traits:
//! SQLite repositories over SQLx, the HTTP URL shortener, and operator
//! alert fan-out through the chat transport.

pub mod alerts;
pub mod database;
pub mod shortener;

use lg_shared::config::DatabaseConfig;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Load database configuration from the environment.
///
/// Reads `.env` if present; unset variables fall back to the defaults.
pub fn load_database_config() -> DatabaseConfig {
    dotenvy::dotenv().ok();

    let mut config = DatabaseConfig::default();
    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.url = url;
    }
    if let Some(max) = std::env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
    {
        config.max_connections = max;
    }
    config
}
