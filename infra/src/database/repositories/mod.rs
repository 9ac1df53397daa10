//! SQLite implementations of the core repository traits

mod channel_repository;
mod event_repository;
mod link_repository;
mod session_repository;
mod token_repository;
mod user_repository;

pub use channel_repository::SqliteChannelRepository;
pub use event_repository::SqliteEventLogRepository;
pub use link_repository::SqliteLinkRepository;
pub use session_repository::SqliteSessionRepository;
pub use token_repository::SqliteTokenRepository;
pub use user_repository::SqliteUserRepository;

use lg_core::errors::DomainError;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// Decode one column, translating decode failures into a domain error.
pub(crate) fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name).map_err(DomainError::database)
}
