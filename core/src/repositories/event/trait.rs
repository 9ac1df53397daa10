//! Append-only event log repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use lg_shared::types::common::UserId;

use crate::errors::DomainError;

/// Append-only event log used for usage analytics.
///
/// Logging is observability, not control flow: callers treat failures as
/// non-fatal and the pipeline never reads the log back to make decisions.
#[async_trait]
pub trait EventLogRepository: Send + Sync {
    /// Append one event.
    async fn append(
        &self,
        event_type: &str,
        user_id: UserId,
        data: serde_json::Value,
    ) -> Result<(), DomainError>;

    /// Delete events older than `cutoff`.
    async fn prune_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError>;
}
