//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Sliding-window rate limits applied per user by the gate.
///
/// The general window bounds every interaction; the verification window is a
/// stricter sub-window applied on top of it for verification-class actions.
/// All values can be overridden by the settings store without a code change.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GateRateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Max requests per user inside the general window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// General window length in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,

    /// Max verification-class requests inside the verification window
    #[serde(default = "default_verification_max_attempts")]
    pub verification_max_attempts: u32,

    /// Verification window length in seconds
    #[serde(default = "default_verification_window_seconds")]
    pub verification_window_seconds: u64,
}

impl Default for GateRateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_requests: default_max_requests(),
            window_seconds: default_window_seconds(),
            verification_max_attempts: default_verification_max_attempts(),
            verification_window_seconds: default_verification_window_seconds(),
        }
    }
}

impl GateRateLimitConfig {
    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            max_requests: 200,
            verification_max_attempts: 30,
            ..Self::default()
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_max_requests() -> u32 {
    20
}

fn default_window_seconds() -> u64 {
    60
}

fn default_verification_max_attempts() -> u32 {
    3
}

fn default_verification_window_seconds() -> u64 {
    30
}
