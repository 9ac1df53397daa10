//! Session repository trait defining the interface for session persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use lg_shared::types::common::UserId;

use crate::domain::entities::Session;
use crate::errors::DomainError;

/// Repository contract for access sessions.
///
/// Implementations must make `insert_exclusive` atomic: deactivating the
/// user's prior sessions and inserting the new row must happen as one unit,
/// or the at-most-one-active-session invariant breaks under concurrency.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Atomically deactivate all of the user's active sessions, then insert
    /// `session` as the sole active one.
    async fn insert_exclusive(&self, session: Session) -> Result<Session, DomainError>;

    /// Find the user's active, unexpired session at `now`.
    ///
    /// A row whose active flag is still set but whose expiry has passed must
    /// not be returned; expiry is re-checked at read time rather than
    /// waiting for the maintenance sweep.
    async fn find_active(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, DomainError>;

    /// Explicitly deactivate all sessions for a user.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of sessions deactivated
    async fn deactivate_for_user(&self, user_id: UserId) -> Result<usize, DomainError>;

    /// Flip the active flag off on every session already past expiry.
    /// Housekeeping for the maintenance sweep; correctness does not depend
    /// on it.
    async fn deactivate_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Count sessions that are active and unexpired at `now`.
    async fn count_active(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
