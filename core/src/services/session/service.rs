//! Session grant and lookup logic

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use lg_shared::types::common::UserId;

use crate::domain::entities::Session;
use crate::errors::DomainResult;
use crate::repositories::SessionRepository;

/// Grants and queries time-bounded access sessions.
///
/// At most one session per user is active at any time; granting a new one
/// replaces whatever was active before.
pub struct SessionService<S: SessionRepository> {
    sessions: Arc<S>,
    duration: Duration,
}

impl<S: SessionRepository> SessionService<S> {
    pub fn new(sessions: Arc<S>, duration_seconds: u64) -> Self {
        Self {
            sessions,
            duration: Duration::seconds(duration_seconds as i64),
        }
    }

    /// Grant a fresh session starting at `now`, replacing any prior one.
    pub async fn grant(&self, user_id: UserId, now: DateTime<Utc>) -> DomainResult<Session> {
        let session = self
            .sessions
            .insert_exclusive(Session::new(user_id, now, self.duration))
            .await?;
        tracing::info!(
            user_id,
            expiry = %session.expiry_time,
            event = "session_granted",
            "Access session granted"
        );
        Ok(session)
    }

    /// The user's live session at `now`, if any.
    pub async fn active(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Session>> {
        self.sessions.find_active(user_id, now).await
    }

    /// Deactivate the user's sessions.
    ///
    /// # Returns
    /// Number of sessions deactivated.
    pub async fn revoke(&self, user_id: UserId) -> DomainResult<usize> {
        let count = self.sessions.deactivate_for_user(user_id).await?;
        if count > 0 {
            tracing::info!(user_id, count, event = "session_revoked", "Sessions revoked");
        }
        Ok(count)
    }

    /// Time left on the user's live session, if any.
    pub async fn time_remaining(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Duration>> {
        Ok(self
            .active(user_id, now)
            .await?
            .map(|s| s.time_remaining(now)))
    }
}
