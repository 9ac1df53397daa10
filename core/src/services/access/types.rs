//! Request and outcome types for the access controller

use lg_shared::types::common::UserId;

use crate::errors::AccessError;
use crate::services::membership::ChannelMembership;

/// Identity of the user making a request, as reported by the transport.
#[derive(Debug, Clone)]
pub struct Requester {
    pub id: UserId,
    pub username: Option<String>,
    pub full_name: Option<String>,
}

impl Requester {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            username: None,
            full_name: None,
        }
    }
}

/// Result of one content delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Items the link references
    pub requested: usize,

    /// Items successfully copied to the user
    pub delivered: usize,

    /// Items skipped because the copy failed
    pub failed: usize,
}

/// What the pipeline decided for a given interaction.
#[derive(Debug, Clone)]
pub enum AccessOutcome {
    /// Access granted; content was delivered when a request was pending
    Granted { delivery: Option<DeliveryReport> },

    /// One or more required channels are not joined yet
    JoinRequired { channels: Vec<ChannelMembership> },

    /// A verification challenge was issued
    VerificationRequired { short_url: String },

    /// The challenge could not be issued because the shortener is down
    VerificationUnavailable,

    /// Redemption came back faster than the bypass threshold; a fresh
    /// challenge was issued when possible
    BypassDetected { short_url: Option<String> },

    /// The request was refused outright
    Denied { reason: AccessError },

    /// The interaction presumes a pending request that does not exist
    NoPendingRequest,
}

impl AccessOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessOutcome::Granted { .. })
    }
}
