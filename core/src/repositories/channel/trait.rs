//! Force-join channel repository trait.

use async_trait::async_trait;

use lg_shared::types::common::ChannelId;

use crate::domain::entities::ForceJoinChannel;
use crate::errors::DomainError;

/// Repository contract for the force-join channel set.
///
/// The channel set is configured by the admin collaborator and read by the
/// membership gate on every gated request.
#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Insert or replace a channel entry, keyed by its identity.
    async fn upsert(&self, channel: ForceJoinChannel) -> Result<(), DomainError>;

    /// Remove a channel by numeric id.
    ///
    /// # Returns
    /// * `Ok(true)` - Channel was removed
    /// * `Ok(false)` - No channel with that id
    async fn remove(&self, channel_id: ChannelId) -> Result<bool, DomainError>;

    /// Channels currently participating in gating.
    async fn active_channels(&self) -> Result<Vec<ForceJoinChannel>, DomainError>;

    /// Every configured channel, active or not.
    async fn all_channels(&self) -> Result<Vec<ForceJoinChannel>, DomainError>;
}
