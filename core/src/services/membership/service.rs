//! Membership gate evaluation

use std::sync::Arc;

use lg_shared::types::common::{ChannelId, UserId};

use crate::domain::entities::ForceJoinChannel;

use super::traits::ChatGateway;

/// Per-channel verdict produced by an evaluation.
#[derive(Debug, Clone)]
pub struct ChannelMembership {
    pub channel: ForceJoinChannel,
    pub is_member: bool,
}

/// Evaluates force-join requirements against the messaging transport.
pub struct MembershipService<G: ChatGateway> {
    gateway: Arc<G>,
}

impl<G: ChatGateway> MembershipService<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Evaluate the user's membership in every given channel.
    ///
    /// Side-effect-free. Any lookup failure marks that channel as not
    /// joined; the gate never fails open. An empty channel set vacuously
    /// passes.
    pub async fn evaluate(
        &self,
        user_id: UserId,
        channels: &[ForceJoinChannel],
    ) -> Vec<ChannelMembership> {
        let mut results = Vec::with_capacity(channels.len());
        for channel in channels {
            let is_member = self.check_one(user_id, channel).await;
            results.push(ChannelMembership {
                channel: channel.clone(),
                is_member,
            });
        }
        results
    }

    /// Aggregate pass: logical AND over all per-channel results.
    pub fn all_joined(results: &[ChannelMembership]) -> bool {
        results.iter().all(|r| r.is_member)
    }

    async fn check_one(&self, user_id: UserId, channel: &ForceJoinChannel) -> bool {
        let chat_id = match self.addressable_id(channel).await {
            Some(id) => id,
            None => {
                tracing::warn!(
                    user_id,
                    channel = %channel.title,
                    event = "membership_check_failed",
                    "Could not resolve channel identity; treating as not joined"
                );
                return false;
            }
        };

        match self.gateway.member_role(chat_id, user_id).await {
            Ok(role) => role.grants_membership(),
            Err(e) => {
                // Fail closed: an unreachable channel gates exactly like a
                // channel the user has not joined.
                tracing::warn!(
                    user_id,
                    channel = %channel.title,
                    error = %e,
                    event = "membership_check_failed",
                    "Membership lookup failed; treating as not joined"
                );
                false
            }
        }
    }

    /// Prefer the stored numeric id, normalized to the transport's
    /// supergroup form; otherwise resolve the handle through the gateway.
    async fn addressable_id(&self, channel: &ForceJoinChannel) -> Option<ChannelId> {
        if let Some(id) = channel.channel_id {
            return Some(normalize_chat_id(id));
        }

        let username = channel.username.as_deref()?;
        match self.gateway.resolve_channel(username).await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(
                    username,
                    error = %e,
                    event = "channel_resolution_failed",
                    "Handle resolution failed"
                );
                None
            }
        }
    }
}

/// Private channels are stored with a bare positive id; the transport
/// addresses them in `-100`-prefixed form.
fn normalize_chat_id(id: ChannelId) -> ChannelId {
    if id > 0 {
        format!("-100{}", id).parse().unwrap_or(id)
    } else {
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use lg_shared::types::common::MessageId;

    use crate::services::membership::MemberRole;

    struct MockGateway {
        roles: Mutex<HashMap<(ChannelId, UserId), MemberRole>>,
        failing_channels: Mutex<HashSet<ChannelId>>,
        handles: Mutex<HashMap<String, ChannelId>>,
    }

    impl MockGateway {
        fn new() -> Self {
            Self {
                roles: Mutex::new(HashMap::new()),
                failing_channels: Mutex::new(HashSet::new()),
                handles: Mutex::new(HashMap::new()),
            }
        }

        fn set_role(&self, channel: ChannelId, user: UserId, role: MemberRole) {
            self.roles.lock().unwrap().insert((channel, user), role);
        }
    }

    #[async_trait]
    impl ChatGateway for MockGateway {
        async fn resolve_channel(&self, username: &str) -> Result<ChannelId, String> {
            self.handles
                .lock()
                .unwrap()
                .get(username)
                .copied()
                .ok_or_else(|| "unknown handle".to_string())
        }

        async fn member_role(
            &self,
            channel_id: ChannelId,
            user_id: UserId,
        ) -> Result<MemberRole, String> {
            if self.failing_channels.lock().unwrap().contains(&channel_id) {
                return Err("channel unreachable".to_string());
            }
            Ok(self
                .roles
                .lock()
                .unwrap()
                .get(&(channel_id, user_id))
                .copied()
                .unwrap_or(MemberRole::Left))
        }

        async fn copy_message(
            &self,
            _from_channel: ChannelId,
            message_id: MessageId,
            _to_chat: ChannelId,
        ) -> Result<MessageId, String> {
            Ok(message_id)
        }

        async fn send_message(&self, _chat_id: ChannelId, _text: &str) -> Result<MessageId, String> {
            Ok(1)
        }
    }

    fn channel(id: ChannelId, title: &str) -> ForceJoinChannel {
        ForceJoinChannel::new(Some(id), None, title.into(), "https://t.me/+x".into())
    }

    #[tokio::test]
    async fn test_empty_channel_set_vacuously_passes() {
        let service = MembershipService::new(Arc::new(MockGateway::new()));
        let results = service.evaluate(1, &[]).await;
        assert!(results.is_empty());
        assert!(MembershipService::<MockGateway>::all_joined(&results));
    }

    #[tokio::test]
    async fn test_member_roles_grant_membership() {
        let gateway = Arc::new(MockGateway::new());
        gateway.set_role(-100, 1, MemberRole::Member);
        gateway.set_role(-200, 1, MemberRole::Administrator);
        gateway.set_role(-300, 1, MemberRole::Owner);
        gateway.set_role(-400, 1, MemberRole::Left);

        let service = MembershipService::new(gateway);
        let channels = vec![
            channel(-100, "a"),
            channel(-200, "b"),
            channel(-300, "c"),
            channel(-400, "d"),
        ];
        let results = service.evaluate(1, &channels).await;

        assert!(results[0].is_member);
        assert!(results[1].is_member);
        assert!(results[2].is_member);
        assert!(!results[3].is_member);
        assert!(!MembershipService::<MockGateway>::all_joined(&results));
    }

    #[tokio::test]
    async fn test_lookup_failure_is_fail_closed() {
        let gateway = Arc::new(MockGateway::new());
        gateway.set_role(-100, 1, MemberRole::Member);
        gateway.failing_channels.lock().unwrap().insert(-100);

        let service = MembershipService::new(gateway);
        let results = service.evaluate(1, &[channel(-100, "a")]).await;
        assert!(!results[0].is_member);
    }

    #[tokio::test]
    async fn test_handle_resolution() {
        let gateway = Arc::new(MockGateway::new());
        gateway.handles.lock().unwrap().insert("archive".into(), -100777);
        gateway.set_role(-100777, 1, MemberRole::Member);

        let service = MembershipService::new(gateway);
        let by_handle = ForceJoinChannel::new(
            None,
            Some("archive".into()),
            "Archive".into(),
            "https://t.me/archive".into(),
        );
        let results = service.evaluate(1, &[by_handle]).await;
        assert!(results[0].is_member);
    }

    #[tokio::test]
    async fn test_unresolvable_handle_is_not_joined() {
        let service = MembershipService::new(Arc::new(MockGateway::new()));
        let by_handle = ForceJoinChannel::new(
            None,
            Some("missing".into()),
            "Missing".into(),
            "https://t.me/missing".into(),
        );
        let results = service.evaluate(1, &[by_handle]).await;
        assert!(!results[0].is_member);
    }

    #[test]
    fn test_normalize_chat_id() {
        assert_eq!(normalize_chat_id(123456789), -100123456789);
        assert_eq!(normalize_chat_id(-100123456789), -100123456789);
    }
}
