//! Per-user sliding-window rate limiting
//!
//! The window lives in process memory only: it resets on restart and does
//! not coordinate across instances. Promoting it to a shared counter store
//! is the known path for a multi-instance deployment.

mod service;

pub use service::{ActionClass, RateLimitDecision, RateLimiter, SlidingWindowRateLimiter};
