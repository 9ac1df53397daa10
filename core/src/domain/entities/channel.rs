//! Force-join channel entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lg_shared::types::common::ChannelId;

/// A community the user must demonstrably belong to before content is
/// released.
///
/// Read-only input to the membership gate; its lifecycle is owned by the
/// admin collaborator. A channel carries a numeric id, a handle, or both;
/// the gate prefers the id and resolves the handle through the transport
/// when no id is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceJoinChannel {
    /// Stored numeric channel id, if known
    pub channel_id: Option<ChannelId>,

    /// Channel handle, if public
    pub username: Option<String>,

    /// Display title shown in join prompts
    pub title: String,

    /// Invite reference presented to users who have not joined
    pub invite_link: String,

    /// Whether the channel currently participates in gating
    pub is_active: bool,

    /// Whether membership is required (as opposed to advisory)
    pub required: bool,

    /// When the channel was configured
    pub added_at: DateTime<Utc>,
}

impl ForceJoinChannel {
    /// Creates an active, required channel entry.
    pub fn new(
        channel_id: Option<ChannelId>,
        username: Option<String>,
        title: String,
        invite_link: String,
    ) -> Self {
        Self {
            channel_id,
            username,
            title,
            invite_link,
            is_active: true,
            required: true,
            added_at: Utc::now(),
        }
    }
}
