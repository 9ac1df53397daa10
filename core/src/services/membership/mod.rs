//! Channel-membership ("force-join") gating
//!
//! Evaluates whether a user belongs to every configured channel before the
//! verification step is offered. Lookup failures are treated as not joined:
//! the gate fails closed.

mod service;
mod traits;

pub use service::{ChannelMembership, MembershipService};
pub use traits::{ChatGateway, MemberRole};
