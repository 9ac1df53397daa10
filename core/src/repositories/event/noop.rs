//! No-op implementation of EventLogRepository for when event logging is not
//! needed

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use lg_shared::types::common::UserId;

use crate::errors::DomainError;

use super::EventLogRepository;

/// No-op event log. Used as the default when a deployment has no analytics
/// store configured.
pub struct NoOpEventLogRepository;

impl NoOpEventLogRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpEventLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventLogRepository for NoOpEventLogRepository {
    async fn append(
        &self,
        _event_type: &str,
        _user_id: UserId,
        _data: serde_json::Value,
    ) -> Result<(), DomainError> {
        Ok(())
    }

    async fn prune_older_than(&self, _cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        Ok(0)
    }
}
