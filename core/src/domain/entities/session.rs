//! Access session entity.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};

use lg_shared::types::common::UserId;

/// Length of a session id in random bytes (hex-encoded to twice this length)
const SESSION_ID_BYTES: usize = 16;

/// A time-bounded grant allowing unlimited content requests without
/// repeating the join and verification steps.
///
/// Invariant: at most one session per user is active at any time. The store
/// enforces this by deactivating prior sessions atomically when a new one is
/// inserted; readers additionally re-check expiry so a lazily-expired row is
/// treated as absent without waiting for the maintenance sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique random identifier
    pub session_id: String,

    /// Owning user
    pub user_id: UserId,

    /// When the session was granted
    pub start_time: DateTime<Utc>,

    /// When the session expires
    pub expiry_time: DateTime<Utc>,

    /// Active flag; flipped off on replacement, logout, or sweep
    pub is_active: bool,
}

impl Session {
    /// Creates a new active session starting at `now`.
    pub fn new(user_id: UserId, now: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            session_id: generate_session_id(),
            user_id,
            start_time: now,
            expiry_time: now + duration,
            is_active: true,
        }
    }

    /// Whether the session grants access at `now`.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.is_active && now < self.expiry_time
    }

    /// Time remaining until expiry, or zero if already past.
    pub fn time_remaining(&self, now: DateTime<Utc>) -> Duration {
        if self.expiry_time > now {
            self.expiry_time - now
        } else {
            Duration::zero()
        }
    }
}

/// Generates a cryptographically random session id.
fn generate_session_id() -> String {
    let mut bytes = [0u8; SESSION_ID_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_live() {
        let now = Utc::now();
        let session = Session::new(7, now, Duration::hours(6));

        assert!(session.is_live(now));
        assert_eq!(session.session_id.len(), SESSION_ID_BYTES * 2);
        assert_eq!(session.expiry_time, now + Duration::hours(6));
    }

    #[test]
    fn test_expired_session_is_not_live() {
        let now = Utc::now();
        let session = Session::new(7, now - Duration::hours(7), Duration::hours(6));
        assert!(!session.is_live(now));
        assert_eq!(session.time_remaining(now), Duration::zero());
    }

    #[test]
    fn test_deactivated_session_is_not_live() {
        let now = Utc::now();
        let mut session = Session::new(7, now, Duration::hours(6));
        session.is_active = false;
        assert!(!session.is_live(now));
    }

    #[test]
    fn test_session_ids_are_unique() {
        let now = Utc::now();
        let a = Session::new(7, now, Duration::hours(6));
        let b = Session::new(7, now, Duration::hours(6));
        assert_ne!(a.session_id, b.session_id);
    }
}
