//! Shared utilities and common types for the LinkGate backend
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Common id aliases
//! - Message-link parsing and time formatting utilities

pub mod config;
pub mod types;
pub mod utils;

pub use types::common::{ChannelId, MessageId, UserId};
