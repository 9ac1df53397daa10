//! In-memory mock implementation of the token repository for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

use lg_shared::types::common::UserId;

use crate::domain::entities::VerificationToken;
use crate::errors::DomainError;

use super::TokenRepository;

/// A recorded bypass attempt, kept for test assertions.
#[derive(Debug, Clone)]
pub struct BypassEntry {
    pub user_id: UserId,
    pub token: String,
    pub elapsed_seconds: f64,
    pub at: DateTime<Utc>,
}

/// Mock token repository backed by vectors behind a mutex.
pub struct MockTokenRepository {
    pub tokens: Arc<Mutex<Vec<VerificationToken>>>,
    pub bypass_log: Arc<Mutex<Vec<BypassEntry>>>,
}

impl MockTokenRepository {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(Mutex::new(Vec::new())),
            bypass_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Seed the repository with a token, bypassing `insert`.
    pub fn with_token(token: VerificationToken) -> Self {
        let repo = Self::new();
        repo.tokens.lock().unwrap().push(token);
        repo
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn insert(&self, token: VerificationToken) -> Result<VerificationToken, DomainError> {
        let mut tokens = self.tokens.lock().unwrap();
        tokens.push(token.clone());
        Ok(token)
    }

    async fn find(&self, token: &str) -> Result<Option<VerificationToken>, DomainError> {
        let tokens = self.tokens.lock().unwrap();
        Ok(tokens.iter().find(|t| t.token == token).cloned())
    }

    async fn mark_used_if_unused(
        &self,
        token: &str,
        user_id: UserId,
        redeemed_at: DateTime<Utc>,
        bypassed: bool,
    ) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.lock().unwrap();
        match tokens
            .iter_mut()
            .find(|t| t.token == token && t.user_id == user_id && !t.is_used)
        {
            Some(record) => {
                record.is_used = true;
                record.is_bypassed = bypassed;
                record.redeemed_at = Some(redeemed_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_short_url(&self, token: &str, short_url: &str) -> Result<(), DomainError> {
        let mut tokens = self.tokens.lock().unwrap();
        if let Some(record) = tokens.iter_mut().find(|t| t.token == token) {
            record.short_url = Some(short_url.to_string());
        }
        Ok(())
    }

    async fn log_bypass_attempt(
        &self,
        user_id: UserId,
        token: &str,
        elapsed_seconds: f64,
    ) -> Result<(), DomainError> {
        self.bypass_log.lock().unwrap().push(BypassEntry {
            user_id,
            token: token.to_string(),
            elapsed_seconds,
            at: Utc::now(),
        });
        Ok(())
    }

    async fn count_bypass_attempts_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        let log = self.bypass_log.lock().unwrap();
        Ok(log.iter().filter(|e| e.at > cutoff).count() as u64)
    }

    async fn delete_stale_unused(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|t| t.is_used || t.created_at >= cutoff);
        Ok(before - tokens.len())
    }
}
