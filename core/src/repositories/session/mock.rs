//! In-memory mock implementation of the session repository for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

use lg_shared::types::common::UserId;

use crate::domain::entities::Session;
use crate::errors::DomainError;

use super::SessionRepository;

/// Mock session repository backed by a `Vec` behind a mutex.
pub struct MockSessionRepository {
    pub sessions: Arc<Mutex<Vec<Session>>>,
    /// When set, every call fails with a database error
    pub fail: Arc<Mutex<bool>>,
}

impl MockSessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(Vec::new())),
            fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        *self.fail.lock().unwrap() = failing;
    }

    fn check_fail(&self) -> Result<(), DomainError> {
        if *self.fail.lock().unwrap() {
            return Err(DomainError::Database {
                message: "mock session repository failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn insert_exclusive(&self, session: Session) -> Result<Session, DomainError> {
        self.check_fail()?;
        let mut sessions = self.sessions.lock().unwrap();
        for existing in sessions.iter_mut().filter(|s| s.user_id == session.user_id) {
            existing.is_active = false;
        }
        sessions.push(session.clone());
        Ok(session)
    }

    async fn find_active(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, DomainError> {
        self.check_fail()?;
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions
            .iter()
            .find(|s| s.user_id == user_id && s.is_live(now))
            .cloned())
    }

    async fn deactivate_for_user(&self, user_id: UserId) -> Result<usize, DomainError> {
        self.check_fail()?;
        let mut sessions = self.sessions.lock().unwrap();
        let mut count = 0;
        for session in sessions
            .iter_mut()
            .filter(|s| s.user_id == user_id && s.is_active)
        {
            session.is_active = false;
            count += 1;
        }
        Ok(count)
    }

    async fn deactivate_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        self.check_fail()?;
        let mut sessions = self.sessions.lock().unwrap();
        let mut count = 0;
        for session in sessions
            .iter_mut()
            .filter(|s| s.is_active && s.expiry_time <= now)
        {
            session.is_active = false;
            count += 1;
        }
        Ok(count)
    }

    async fn count_active(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        self.check_fail()?;
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions.iter().filter(|s| s.is_live(now)).count() as u64)
    }
}
