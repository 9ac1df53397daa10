//! Messaging transport trait consumed by the gate

use async_trait::async_trait;

use lg_shared::types::common::{ChannelId, MessageId, UserId};

/// A user's role within a channel, as reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRole {
    Member,
    Administrator,
    Owner,
    Restricted,
    Left,
    Banned,
}

impl MemberRole {
    /// Whether this role counts as "joined" for gating purposes.
    pub fn grants_membership(&self) -> bool {
        matches!(
            self,
            MemberRole::Member | MemberRole::Administrator | MemberRole::Owner
        )
    }
}

/// Trait for the messaging transport collaborator.
///
/// All operations are best-effort; errors are reported as strings and must
/// never crash the pipeline.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Resolve a channel handle to its numeric id.
    async fn resolve_channel(&self, username: &str) -> Result<ChannelId, String>;

    /// Query the user's role within a channel.
    async fn member_role(&self, channel_id: ChannelId, user_id: UserId)
        -> Result<MemberRole, String>;

    /// Copy one archived message to a destination chat, returning the id of
    /// the delivered copy.
    async fn copy_message(
        &self,
        from_channel: ChannelId,
        message_id: MessageId,
        to_chat: ChannelId,
    ) -> Result<MessageId, String>;

    /// Send a plain text message to a chat.
    async fn send_message(&self, chat_id: ChannelId, text: &str) -> Result<MessageId, String>;
}
