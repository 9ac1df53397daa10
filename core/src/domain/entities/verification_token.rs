//! Verification token entity for the timed anti-automation challenge.

use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};

use lg_shared::types::common::UserId;

/// Length of a token in random bytes; 16 bytes gives 128 bits of entropy
const TOKEN_BYTES: usize = 16;

/// A single-use, time-stamped credential proving a user waited through the
/// external challenge step.
///
/// Created at issuance, mutated exactly once at redemption (`is_used` flips
/// on, `is_bypassed` and `redeemed_at` are recorded), never reused. The
/// creation timestamp must survive until redemption, which may be arbitrarily
/// delayed or never happen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationToken {
    /// The unguessable token string (hex, 128 bits of entropy)
    pub token: String,

    /// Owning user; redemption by anyone else is invalid
    pub user_id: UserId,

    /// Issuance timestamp, the anchor for bypass classification
    pub created_at: DateTime<Utc>,

    /// Shortened challenge link handed to the user, once obtained
    pub short_url: Option<String>,

    /// Whether the token has been redeemed
    pub is_used: bool,

    /// Whether redemption arrived faster than the bypass threshold
    pub is_bypassed: bool,

    /// When the token was redeemed
    pub redeemed_at: Option<DateTime<Utc>>,
}

impl VerificationToken {
    /// Issues a fresh token for `user_id`.
    pub fn new(user_id: UserId) -> Self {
        Self {
            token: generate_token(),
            user_id,
            created_at: Utc::now(),
            short_url: None,
            is_used: false,
            is_bypassed: false,
            redeemed_at: None,
        }
    }

    /// Seconds elapsed between issuance and `now`. Negative if the clock
    /// moved backwards; callers treat that as below any threshold.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> f64 {
        (now - self.created_at).num_milliseconds() as f64 / 1000.0
    }
}

/// Generates a cryptographically random token string.
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
