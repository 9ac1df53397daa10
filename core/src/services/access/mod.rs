//! Access controller orchestrating the full gating pipeline
//!
//! Order of checks for a content request: rate limit, then an active-session
//! fast path, then channel membership, then the verification challenge. A
//! redeemed challenge grants a session and delivers whatever request was
//! pending.

mod pending;
mod service;
mod traits;
mod types;


pub use service::AccessService;
pub use traits::{AlertSeverity, OperatorAlerts, UrlShortener};
pub use types::{AccessOutcome, DeliveryReport, Requester};
