//! User entity representing someone who has contacted the gate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lg_shared::types::common::UserId;

/// A user known to the gate.
///
/// Created on first contact and updated on every interaction; never deleted
/// by the access-control core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque numeric id assigned by the messaging transport
    pub user_id: UserId,

    /// Handle, if the transport exposes one
    pub username: Option<String>,

    /// Display name
    pub full_name: Option<String>,

    /// Timestamp of first contact
    pub joined_at: DateTime<Utc>,

    /// Timestamp of the most recent interaction
    pub last_active: Option<DateTime<Utc>>,

    /// Total number of interactions recorded
    pub total_requests: i64,
}

impl User {
    /// Creates a user record for a first contact.
    pub fn new(user_id: UserId, username: Option<String>, full_name: Option<String>) -> Self {
        Self {
            user_id,
            username,
            full_name,
            joined_at: Utc::now(),
            last_active: None,
            total_requests: 0,
        }
    }

    /// Records an interaction: refreshes display metadata, bumps the request
    /// counter and the last-active timestamp.
    pub fn record_contact(&mut self, username: Option<String>, full_name: Option<String>) {
        if username.is_some() {
            self.username = username;
        }
        if full_name.is_some() {
            self.full_name = full_name;
        }
        self.last_active = Some(Utc::now());
        self.total_requests += 1;
    }
}
