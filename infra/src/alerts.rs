//! Operator alert fan-out through the chat transport

use async_trait::async_trait;
use std::sync::Arc;

use lg_core::services::{AlertSeverity, ChatGateway, OperatorAlerts};
use lg_shared::types::common::ChannelId;

/// Sends operator alerts as direct messages to the configured admin chats.
///
/// Fire-and-forget: a failure to reach one admin is logged and does not
/// stop delivery to the others.
pub struct GatewayAlerts<G: ChatGateway> {
    gateway: Arc<G>,
    admin_chat_ids: Vec<ChannelId>,
}

impl<G: ChatGateway> GatewayAlerts<G> {
    pub fn new(gateway: Arc<G>, admin_chat_ids: Vec<ChannelId>) -> Self {
        Self {
            gateway,
            admin_chat_ids,
        }
    }

    fn prefix(severity: AlertSeverity) -> &'static str {
        match severity {
            AlertSeverity::Info => "[info]",
            AlertSeverity::Warning => "[warning]",
            AlertSeverity::Error => "[ALERT]",
        }
    }
}

#[async_trait]
impl<G: ChatGateway> OperatorAlerts for GatewayAlerts<G> {
    async fn notify(&self, message: &str, severity: AlertSeverity) {
        let text = format!("{} {}", Self::prefix(severity), message);
        for chat_id in &self.admin_chat_ids {
            if let Err(e) = self.gateway.send_message(*chat_id, &text).await {
                tracing::warn!(
                    chat_id,
                    error = %e,
                    "Failed to deliver operator alert"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lg_core::services::MemberRole;
    use lg_shared::types::common::{MessageId, UserId};
    use std::collections::HashSet;
    use std::sync::Mutex;

    struct RecordingGateway {
        sent: Mutex<Vec<(ChannelId, String)>>,
        failing: Mutex<HashSet<ChannelId>>,
    }

    impl RecordingGateway {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                failing: Mutex::new(HashSet::new()),
            }
        }
    }

    #[async_trait]
    impl ChatGateway for RecordingGateway {
        async fn resolve_channel(&self, _username: &str) -> Result<ChannelId, String> {
            Err("not supported".to_string())
        }

        async fn member_role(
            &self,
            _channel_id: ChannelId,
            _user_id: UserId,
        ) -> Result<MemberRole, String> {
            Ok(MemberRole::Left)
        }

        async fn copy_message(
            &self,
            _from_channel: ChannelId,
            message_id: MessageId,
            _to_chat: ChannelId,
        ) -> Result<MessageId, String> {
            Ok(message_id)
        }

        async fn send_message(&self, chat_id: ChannelId, text: &str) -> Result<MessageId, String> {
            if self.failing.lock().unwrap().contains(&chat_id) {
                return Err("blocked".to_string());
            }
            self.sent.lock().unwrap().push((chat_id, text.to_string()));
            Ok(1)
        }
    }

    #[tokio::test]
    async fn test_alert_reaches_every_admin() {
        let gateway = Arc::new(RecordingGateway::new());
        let alerts = GatewayAlerts::new(gateway.clone(), vec![10, 20]);

        alerts.notify("shortener down", AlertSeverity::Error).await;

        let sent = gateway.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert!(sent[0].1.starts_with("[ALERT]"));
    }

    #[tokio::test]
    async fn test_one_unreachable_admin_does_not_block_others() {
        let gateway = Arc::new(RecordingGateway::new());
        gateway.failing.lock().unwrap().insert(10);
        let alerts = GatewayAlerts::new(gateway.clone(), vec![10, 20]);

        alerts.notify("heads up", AlertSeverity::Warning).await;

        let sent = gateway.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, 20);
    }
}
