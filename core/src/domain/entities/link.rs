//! Content link entity: the shareable reference to archived content.

use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};

use lg_shared::types::common::{ChannelId, MessageId, UserId};

use crate::errors::{DomainError, DomainResult};

/// Length of a link id in random bytes
const LINK_ID_BYTES: usize = 8;

/// What a link points at: a single message or an inclusive message range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "link_type", rename_all = "lowercase")]
pub enum LinkKind {
    /// One message in a source channel
    Single {
        channel_id: ChannelId,
        message_id: MessageId,
    },
    /// A contiguous, inclusive range of messages in one source channel
    Batch {
        channel_id: ChannelId,
        start_msg_id: MessageId,
        end_msg_id: MessageId,
    },
}

/// A shareable content reference created by an admin collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLink {
    /// Unique random identifier carried in shared URLs
    pub link_id: String,

    /// What the link points at
    pub kind: LinkKind,

    /// Admin who created the link
    pub created_by: UserId,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Number of successful accesses
    pub uses: i64,

    /// When the link was last accessed
    pub last_used: Option<DateTime<Utc>>,
}

impl ContentLink {
    /// Creates a link to a single message.
    pub fn new_single(channel_id: ChannelId, message_id: MessageId, created_by: UserId) -> Self {
        Self {
            link_id: generate_link_id(),
            kind: LinkKind::Single {
                channel_id,
                message_id,
            },
            created_by,
            created_at: Utc::now(),
            uses: 0,
            last_used: None,
        }
    }

    /// Creates a link to an inclusive message range.
    ///
    /// The end message must come strictly after the start message.
    pub fn new_batch(
        channel_id: ChannelId,
        start_msg_id: MessageId,
        end_msg_id: MessageId,
        created_by: UserId,
    ) -> DomainResult<Self> {
        if end_msg_id <= start_msg_id {
            return Err(DomainError::Internal {
                message: format!(
                    "batch end message {} must come after start message {}",
                    end_msg_id, start_msg_id
                ),
            });
        }

        Ok(Self {
            link_id: generate_link_id(),
            kind: LinkKind::Batch {
                channel_id,
                start_msg_id,
                end_msg_id,
            },
            created_by,
            created_at: Utc::now(),
            uses: 0,
            last_used: None,
        })
    }

    /// Whether this link references a message range.
    pub fn is_batch(&self) -> bool {
        matches!(self.kind, LinkKind::Batch { .. })
    }

    /// Number of items this link delivers.
    pub fn item_count(&self) -> usize {
        match self.kind {
            LinkKind::Single { .. } => 1,
            LinkKind::Batch {
                start_msg_id,
                end_msg_id,
                ..
            } => (end_msg_id - start_msg_id + 1) as usize,
        }
    }
}

/// Generates a cryptographically random link id.
fn generate_link_id() -> String {
    let mut bytes = [0u8; LINK_ID_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
