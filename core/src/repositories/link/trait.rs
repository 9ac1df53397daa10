//! Content link repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::ContentLink;
use crate::errors::DomainError;

/// Repository contract for shareable content links.
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Persist a newly created link.
    async fn insert(&self, link: ContentLink) -> Result<ContentLink, DomainError>;

    /// Look up a link by id.
    async fn find(&self, link_id: &str) -> Result<Option<ContentLink>, DomainError>;

    /// Bump the use counter and last-used timestamp after a delivery.
    async fn record_use(&self, link_id: &str, now: DateTime<Utc>) -> Result<(), DomainError>;

    /// Delete a link.
    ///
    /// # Returns
    /// * `Ok(true)` - Link was deleted
    /// * `Ok(false)` - No such link
    async fn delete(&self, link_id: &str) -> Result<bool, DomainError>;

    /// Most recently created links, newest first.
    async fn recent(&self, limit: u32) -> Result<Vec<ContentLink>, DomainError>;
}
