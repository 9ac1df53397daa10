//! Per-user pending-request state

use std::collections::HashMap;
use std::sync::Mutex;

use lg_shared::types::common::UserId;

/// The request a user parked while working through the gate.
///
/// Held in process memory only; a restart clears it and the user simply
/// re-sends the link.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub link_id: String,
    pub is_batch: bool,

    /// Token of the challenge currently out for this request, if one has
    /// been issued
    pub token: Option<String>,
}

/// Keyed store of pending requests, one slot per user.
///
/// A new request from the same user overwrites the previous slot: only the
/// latest request survives the gate.
#[derive(Default)]
pub struct PendingRequestStore {
    inner: Mutex<HashMap<UserId, PendingRequest>>,
}

impl PendingRequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, user_id: UserId, request: PendingRequest) {
        self.lock().insert(user_id, request);
    }

    pub fn get(&self, user_id: UserId) -> Option<PendingRequest> {
        self.lock().get(&user_id).cloned()
    }

    pub fn take(&self, user_id: UserId) -> Option<PendingRequest> {
        self.lock().remove(&user_id)
    }

    /// Record the token issued for the user's pending request, if any.
    pub fn set_token(&self, user_id: UserId, token: &str) {
        if let Some(request) = self.lock().get_mut(&user_id) {
            request.token = Some(token.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<UserId, PendingRequest>> {
        self.inner.lock().expect("pending store lock poisoned")
    }
}
