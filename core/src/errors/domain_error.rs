//! Domain-specific error types for the access-control pipeline
//!
//! The `AccessError` taxonomy covers every way a content request can be
//! refused or stalled; collaborator failures are translated into one of these
//! kinds at the point of call and never propagate as uncaught faults.

use thiserror::Error;

/// Access-control errors surfaced to the requesting user
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccessError {
    #[error("Rate limit exceeded. Please retry in {retry_after_seconds} seconds")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Required channels have not been joined")]
    MembershipIncomplete,

    #[error("Invalid or expired verification. Please try again")]
    TokenInvalid,

    #[error("Verification completed too fast; bypass suspected")]
    TokenBypassed,

    #[error("{collaborator} is temporarily unavailable. Please try again shortly")]
    CollaboratorUnavailable { collaborator: String },

    #[error("Failed to retrieve the requested content. Contact an operator")]
    ContentUnavailable,

    #[error("Invalid or expired link")]
    InvalidReference,
}

/// Unified error type for all core operations
#[derive(Error, Debug)]
pub enum DomainError {
    /// Access-control refusal with a user-facing message
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Storage failure
    #[error("Database error: {message}")]
    Database { message: String },

    /// Unexpected internal failure
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Build a database error from any displayable source.
    pub fn database(source: impl std::fmt::Display) -> Self {
        Self::Database {
            message: source.to_string(),
        }
    }
}

/// Result type alias for core operations
pub type DomainResult<T> = Result<T, DomainError>;
