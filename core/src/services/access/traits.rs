//! Collaborator traits owned by the access controller

use async_trait::async_trait;

/// External URL shortener.
///
/// Shortening is best-effort: `None` means the collaborator was unreachable
/// or returned garbage, and the caller decides how to degrade.
#[async_trait]
pub trait UrlShortener: Send + Sync {
    async fn shorten(&self, long_url: &str) -> Option<String>;
}

/// Severity attached to an operator alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Info,
    Warning,
    Error,
}

/// Fan-out channel for operator notifications.
///
/// Delivery is fire-and-forget; implementations swallow transport failures.
#[async_trait]
pub trait OperatorAlerts: Send + Sync {
    async fn notify(&self, message: &str, severity: AlertSeverity);
}
