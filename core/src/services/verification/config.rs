//! Verification service configuration

/// Tuning knobs for redemption classification.
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Redemptions arriving sooner than this many seconds after issuance
    /// are classified as bypassed.
    pub bypass_threshold_seconds: f64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            bypass_threshold_seconds: 35.0,
        }
    }
}
