//! In-memory mock implementation of the link repository for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

use crate::domain::entities::ContentLink;
use crate::errors::DomainError;

use super::LinkRepository;

pub struct MockLinkRepository {
    pub links: Arc<Mutex<Vec<ContentLink>>>,
}

impl MockLinkRepository {
    pub fn new() -> Self {
        Self {
            links: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_link(link: ContentLink) -> Self {
        let repo = Self::new();
        repo.links.lock().unwrap().push(link);
        repo
    }
}

#[async_trait]
impl LinkRepository for MockLinkRepository {
    async fn insert(&self, link: ContentLink) -> Result<ContentLink, DomainError> {
        self.links.lock().unwrap().push(link.clone());
        Ok(link)
    }

    async fn find(&self, link_id: &str) -> Result<Option<ContentLink>, DomainError> {
        let links = self.links.lock().unwrap();
        Ok(links.iter().find(|l| l.link_id == link_id).cloned())
    }

    async fn record_use(&self, link_id: &str, now: DateTime<Utc>) -> Result<(), DomainError> {
        let mut links = self.links.lock().unwrap();
        if let Some(link) = links.iter_mut().find(|l| l.link_id == link_id) {
            link.uses += 1;
            link.last_used = Some(now);
        }
        Ok(())
    }

    async fn delete(&self, link_id: &str) -> Result<bool, DomainError> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| l.link_id != link_id);
        Ok(links.len() < before)
    }

    async fn recent(&self, limit: u32) -> Result<Vec<ContentLink>, DomainError> {
        let mut links = self.links.lock().unwrap().clone();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        links.truncate(limit as usize);
        Ok(links)
    }
}
