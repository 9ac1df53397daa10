//! Single-use timed verification tokens
//!
//! Issues unguessable tokens, attaches the shortened challenge link, and
//! classifies redemptions as legitimate or bypassed based on the time the
//! user took to come back.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::VerificationConfig;
pub use service::{Redemption, VerificationTokenService};
