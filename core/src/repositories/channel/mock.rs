//! In-memory mock implementation of the channel repository for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use lg_shared::types::common::ChannelId;

use crate::domain::entities::ForceJoinChannel;
use crate::errors::DomainError;

use super::ChannelRepository;

pub struct MockChannelRepository {
    pub channels: Arc<Mutex<Vec<ForceJoinChannel>>>,
}

impl MockChannelRepository {
    pub fn new() -> Self {
        Self {
            channels: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_channels(channels: Vec<ForceJoinChannel>) -> Self {
        let repo = Self::new();
        *repo.channels.lock().unwrap() = channels;
        repo
    }
}

#[async_trait]
impl ChannelRepository for MockChannelRepository {
    async fn upsert(&self, channel: ForceJoinChannel) -> Result<(), DomainError> {
        let mut channels = self.channels.lock().unwrap();
        channels.retain(|c| c.channel_id != channel.channel_id || c.username != channel.username);
        channels.push(channel);
        Ok(())
    }

    async fn remove(&self, channel_id: ChannelId) -> Result<bool, DomainError> {
        let mut channels = self.channels.lock().unwrap();
        let before = channels.len();
        channels.retain(|c| c.channel_id != Some(channel_id));
        Ok(channels.len() < before)
    }

    async fn active_channels(&self) -> Result<Vec<ForceJoinChannel>, DomainError> {
        let channels = self.channels.lock().unwrap();
        Ok(channels.iter().filter(|c| c.is_active).cloned().collect())
    }

    async fn all_channels(&self) -> Result<Vec<ForceJoinChannel>, DomainError> {
        Ok(self.channels.lock().unwrap().clone())
    }
}
