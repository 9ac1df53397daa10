//! # LinkGate Core
//!
//! Core business logic and domain layer for the LinkGate backend.
//! This crate contains the domain entities, the access-control pipeline
//! services, repository interfaces, and error types that decide whether a
//! given user is granted, challenged, or denied access to archived content.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
