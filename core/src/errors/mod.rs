//! Error types for the LinkGate core

mod domain_error;

pub use domain_error::{AccessError, DomainError, DomainResult};
