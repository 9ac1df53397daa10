//! User repository trait.

use async_trait::async_trait;

use lg_shared::types::common::UserId;

use crate::domain::entities::User;
use crate::errors::DomainError;

/// Repository contract for users known to the gate.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Record a contact from `user_id`: create the user on first contact,
    /// otherwise refresh display metadata, bump the request counter and the
    /// last-active timestamp.
    async fn record_contact(
        &self,
        user_id: UserId,
        username: Option<&str>,
        full_name: Option<&str>,
    ) -> Result<User, DomainError>;

    /// Find a user by id.
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, DomainError>;

    /// Total number of users ever seen.
    async fn count(&self) -> Result<u64, DomainError>;
}
