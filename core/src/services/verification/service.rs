//! Verification token issuance and redemption

use std::sync::Arc;

use chrono::{DateTime, Utc};

use lg_shared::types::common::UserId;

use crate::domain::entities::VerificationToken;
use crate::errors::{AccessError, DomainResult};
use crate::repositories::TokenRepository;

use super::config::VerificationConfig;

/// Outcome of a successful single-use redemption.
#[derive(Debug, Clone, PartialEq)]
pub struct Redemption {
    /// Whether the redemption arrived faster than the bypass threshold
    pub bypassed: bool,

    /// Seconds between issuance and redemption
    pub elapsed_seconds: f64,
}

/// Issues and redeems single-use timed verification tokens.
///
/// Redemption never reveals why a token was refused beyond "invalid": a
/// missing token, a replay, and a foreign user's token all collapse into
/// [`AccessError::TokenInvalid`].
pub struct VerificationTokenService<T: TokenRepository> {
    tokens: Arc<T>,
    config: VerificationConfig,
}

impl<T: TokenRepository> VerificationTokenService<T> {
    pub fn new(tokens: Arc<T>, config: VerificationConfig) -> Self {
        Self { tokens, config }
    }

    /// Issue and persist a fresh token for `user_id`.
    pub async fn issue(&self, user_id: UserId) -> DomainResult<VerificationToken> {
        let token = self.tokens.insert(VerificationToken::new(user_id)).await?;
        tracing::info!(user_id, event = "token_issued", "Verification token issued");
        Ok(token)
    }

    /// Attach the shortened challenge link obtained for `token`.
    pub async fn attach_short_url(&self, token: &str, short_url: &str) -> DomainResult<()> {
        self.tokens.set_short_url(token, short_url).await
    }

    /// Redeem `token` for `user_id` at `now`.
    ///
    /// Wins or loses atomically: under concurrent redemption of the same
    /// token at most one caller gets `Ok`. A bypassed redemption still
    /// consumes the token so the same string cannot be replayed slowly.
    pub async fn redeem(
        &self,
        user_id: UserId,
        token: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Redemption> {
        let record = match self.tokens.find(token).await? {
            Some(record) => record,
            None => return Err(AccessError::TokenInvalid.into()),
        };

        if record.user_id != user_id || record.is_used {
            tracing::warn!(
                user_id,
                owner = record.user_id,
                already_used = record.is_used,
                event = "token_rejected",
                "Redemption refused"
            );
            return Err(AccessError::TokenInvalid.into());
        }

        let elapsed_seconds = record.elapsed_seconds(now);
        let bypassed = elapsed_seconds < self.config.bypass_threshold_seconds;

        let won = self
            .tokens
            .mark_used_if_unused(token, user_id, now, bypassed)
            .await?;
        if !won {
            // Lost the race to a concurrent redemption.
            return Err(AccessError::TokenInvalid.into());
        }

        if bypassed {
            self.tokens
                .log_bypass_attempt(user_id, token, elapsed_seconds)
                .await?;
            tracing::warn!(
                user_id,
                elapsed_seconds,
                threshold = self.config.bypass_threshold_seconds,
                event = "bypass_detected",
                "Verification completed too fast"
            );
        } else {
            tracing::info!(
                user_id,
                elapsed_seconds,
                event = "token_redeemed",
                "Verification token redeemed"
            );
        }

        Ok(Redemption {
            bypassed,
            elapsed_seconds,
        })
    }
}
