//! Access policy configuration
//!
//! Timing constants for the verification challenge and the access session.
//! The bypass threshold encodes an assumption that a legitimate completion of
//! the external challenge page cannot finish faster than this; it is a
//! heuristic signal, not a cryptographic guarantee.

use serde::{Deserialize, Serialize};

/// Policy knobs for verification tokens and access sessions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccessPolicyConfig {
    /// Minimum seconds between token issuance and redemption before a
    /// redemption is considered legitimate
    #[serde(default = "default_bypass_threshold_seconds")]
    pub bypass_threshold_seconds: u64,

    /// Lifetime of an access session in seconds
    #[serde(default = "default_session_duration_seconds")]
    pub session_duration_seconds: u64,

    /// Base URL of the external verification page; the token is appended as
    /// the final path segment
    #[serde(default = "default_verify_base_url")]
    pub verify_base_url: String,
}

impl Default for AccessPolicyConfig {
    fn default() -> Self {
        Self {
            bypass_threshold_seconds: default_bypass_threshold_seconds(),
            session_duration_seconds: default_session_duration_seconds(),
            verify_base_url: default_verify_base_url(),
        }
    }
}

impl AccessPolicyConfig {
    /// Build the full verification URL for a token.
    pub fn verification_url(&self, token: &str) -> String {
        format!("{}/verify/{}", self.verify_base_url.trim_end_matches('/'), token)
    }
}

fn default_bypass_threshold_seconds() -> u64 {
    35
}

fn default_session_duration_seconds() -> u64 {
    6 * 60 * 60
}

fn default_verify_base_url() -> String {
    "https://verify.linkgate.example".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AccessPolicyConfig::default();
        assert_eq!(config.bypass_threshold_seconds, 35);
        assert_eq!(config.session_duration_seconds, 21_600);
    }

    #[test]
    fn test_verification_url_joins_cleanly() {
        let config = AccessPolicyConfig {
            verify_base_url: "https://v.example/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.verification_url("abc123"),
            "https://v.example/verify/abc123"
        );
    }
}
