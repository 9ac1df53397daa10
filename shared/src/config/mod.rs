//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `rate_limit` - Sliding-window request limits
//! - `access` - Verification and session policy
//! - `database` - Storage connection settings

pub mod access;
pub mod database;
pub mod rate_limit;

pub use access::AccessPolicyConfig;
pub use database::DatabaseConfig;
pub use rate_limit::GateRateLimitConfig;
