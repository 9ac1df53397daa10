//! Sliding-window rate limiter implementation

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

use lg_shared::config::GateRateLimitConfig;
use lg_shared::types::common::UserId;

/// Class of action being rate limited.
///
/// `Verification` carries the stricter sub-window on top of the general
/// window; the other classes only consume the general window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionClass {
    /// Plain interaction with the gate
    Message,
    /// A content request by reference
    LinkAccess,
    /// A verification issuance attempt
    Verification,
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitDecision {
    Permitted,
    Denied {
        /// Upper bound on the wait before a retry can succeed
        retry_after_seconds: u64,
    },
}

impl RateLimitDecision {
    pub fn is_permitted(&self) -> bool {
        matches!(self, RateLimitDecision::Permitted)
    }
}

/// Rate limiting seam consumed by the access controller.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Check whether `user_id` may perform `action` at `now`.
    ///
    /// A permitted call consumes one slot; a denied call consumes nothing,
    /// so a denial does not push the retry horizon further out.
    async fn check(
        &self,
        user_id: UserId,
        action: ActionClass,
        now: DateTime<Utc>,
    ) -> RateLimitDecision;
}

/// In-memory sliding-window limiter keyed by user id.
///
/// Each user maps to an ordered sequence of recent request instants, pruned
/// lazily on every check. The map is an explicit keyed store owned by this
/// service; `purge_stale` gives the maintenance sweep a way to evict users
/// whose windows have emptied.
pub struct SlidingWindowRateLimiter {
    windows: Mutex<HashMap<UserId, Vec<DateTime<Utc>>>>,
    config: GateRateLimitConfig,
}

impl SlidingWindowRateLimiter {
    pub fn new(config: GateRateLimitConfig) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Drop users whose windows hold no instant newer than the general
    /// window at `now`.
    ///
    /// # Returns
    /// Number of users evicted.
    pub fn purge_stale(&self, now: DateTime<Utc>) -> usize {
        let horizon = now - Duration::seconds(self.config.window_seconds as i64);
        let mut windows = self.windows.lock().expect("rate limiter lock poisoned");
        let before = windows.len();
        windows.retain(|_, instants| instants.iter().any(|t| *t > horizon));
        before - windows.len()
    }

    /// Number of users currently tracked.
    pub fn tracked_users(&self) -> usize {
        self.windows.lock().expect("rate limiter lock poisoned").len()
    }
}

#[async_trait]
impl RateLimiter for SlidingWindowRateLimiter {
    async fn check(
        &self,
        user_id: UserId,
        action: ActionClass,
        now: DateTime<Utc>,
    ) -> RateLimitDecision {
        if !self.config.enabled {
            return RateLimitDecision::Permitted;
        }

        let general_window = Duration::seconds(self.config.window_seconds as i64);
        let mut windows = self.windows.lock().expect("rate limiter lock poisoned");
        let instants = windows.entry(user_id).or_default();

        // Lazy prune: discard everything older than the general window.
        let horizon = now - general_window;
        instants.retain(|t| *t > horizon);

        if instants.len() >= self.config.max_requests as usize {
            let oldest = instants.first().copied().unwrap_or(now);
            let retry = (general_window - (now - oldest)).num_seconds().max(1) as u64;
            tracing::warn!(
                user_id,
                event = "rate_limited",
                window_seconds = self.config.window_seconds,
                "General rate limit exceeded"
            );
            return RateLimitDecision::Denied {
                retry_after_seconds: retry,
            };
        }

        if action == ActionClass::Verification {
            let sub_window = Duration::seconds(self.config.verification_window_seconds as i64);
            let sub_horizon = now - sub_window;
            let recent: Vec<DateTime<Utc>> =
                instants.iter().copied().filter(|t| *t > sub_horizon).collect();

            if recent.len() >= self.config.verification_max_attempts as usize {
                let oldest = recent.first().copied().unwrap_or(now);
                let retry = (sub_window - (now - oldest)).num_seconds().max(1) as u64;
                tracing::warn!(
                    user_id,
                    event = "verification_rate_limited",
                    window_seconds = self.config.verification_window_seconds,
                    "Verification rate limit exceeded"
                );
                return RateLimitDecision::Denied {
                    retry_after_seconds: retry,
                };
            }
        }

        // Only a permitted attempt consumes a slot.
        instants.push(now);
        RateLimitDecision::Permitted
    }
}
