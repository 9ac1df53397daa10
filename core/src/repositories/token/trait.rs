//! Token repository trait defining the interface for verification token
//! persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use lg_shared::types::common::UserId;

use crate::domain::entities::VerificationToken;
use crate::errors::DomainError;

/// Repository contract for verification tokens.
///
/// # Security Considerations
/// - `mark_used_if_unused` is the single-use guard: it must be an atomic
///   compare-and-set so that concurrent redemption attempts on the same
///   token can produce at most one winner.
/// - The creation timestamp recorded at insert must be returned unchanged
///   by `find`; bypass classification depends on it.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Persist a freshly issued token.
    async fn insert(&self, token: VerificationToken) -> Result<VerificationToken, DomainError>;

    /// Look up a token by its string value.
    async fn find(&self, token: &str) -> Result<Option<VerificationToken>, DomainError>;

    /// Atomically mark the token used, recording redemption time and the
    /// bypass flag, but only if it is currently unused and owned by
    /// `user_id`.
    ///
    /// # Returns
    /// * `Ok(true)` - This call won the redemption
    /// * `Ok(false)` - Token missing, foreign, or already used
    async fn mark_used_if_unused(
        &self,
        token: &str,
        user_id: UserId,
        redeemed_at: DateTime<Utc>,
        bypassed: bool,
    ) -> Result<bool, DomainError>;

    /// Attach the shortened challenge link obtained for this token.
    async fn set_short_url(&self, token: &str, short_url: &str) -> Result<(), DomainError>;

    /// Record a bypass-attempt entry for observability. Never affects the
    /// redemption outcome.
    async fn log_bypass_attempt(
        &self,
        user_id: UserId,
        token: &str,
        elapsed_seconds: f64,
    ) -> Result<(), DomainError>;

    /// Count bypass attempts recorded since `cutoff`.
    async fn count_bypass_attempts_since(&self, cutoff: DateTime<Utc>)
        -> Result<u64, DomainError>;

    /// Delete unused tokens created before `cutoff`.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens deleted
    async fn delete_stale_unused(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError>;
}
