//! In-memory mock implementation of the user repository for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use lg_shared::types::common::UserId;

use crate::domain::entities::User;
use crate::errors::DomainError;

use super::UserRepository;

pub struct MockUserRepository {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn record_contact(
        &self,
        user_id: UserId,
        username: Option<&str>,
        full_name: Option<&str>,
    ) -> Result<User, DomainError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.user_id == user_id) {
            user.record_contact(
                username.map(str::to_string),
                full_name.map(str::to_string),
            );
            return Ok(user.clone());
        }

        let mut user = User::new(
            user_id,
            username.map(str::to_string),
            full_name.map(str::to_string),
        );
        user.record_contact(None, None);
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.users.lock().unwrap().len() as u64)
    }
}
