//! In-memory mock implementation of the event log for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

use lg_shared::types::common::UserId;

use crate::errors::DomainError;

use super::EventLogRepository;

#[derive(Debug, Clone)]
pub struct LoggedEvent {
    pub event_type: String,
    pub user_id: UserId,
    pub data: serde_json::Value,
    pub at: DateTime<Utc>,
}

pub struct MockEventLogRepository {
    pub events: Arc<Mutex<Vec<LoggedEvent>>>,
}

impl MockEventLogRepository {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn event_types(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type.clone())
            .collect()
    }
}

#[async_trait]
impl EventLogRepository for MockEventLogRepository {
    async fn append(
        &self,
        event_type: &str,
        user_id: UserId,
        data: serde_json::Value,
    ) -> Result<(), DomainError> {
        self.events.lock().unwrap().push(LoggedEvent {
            event_type: event_type.to_string(),
            user_id,
            data,
            at: Utc::now(),
        });
        Ok(())
    }

    async fn prune_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut events = self.events.lock().unwrap();
        let before = events.len();
        events.retain(|e| e.at >= cutoff);
        Ok(before - events.len())
    }
}
