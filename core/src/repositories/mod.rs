//! Repository interfaces for the authoritative store
//!
//! Each aggregate gets a trait contract plus an in-memory mock used by the
//! service tests. Production implementations live in the infrastructure
//! crate.

pub mod channel;
pub mod event;
pub mod link;
pub mod session;
pub mod token;
pub mod user;

pub use channel::ChannelRepository;
pub use event::{EventLogRepository, NoOpEventLogRepository};
pub use link::LinkRepository;
pub use session::SessionRepository;
pub use token::TokenRepository;
pub use user::UserRepository;

#[cfg(test)]
pub use channel::MockChannelRepository;
#[cfg(test)]
pub use event::MockEventLogRepository;
#[cfg(test)]
pub use link::MockLinkRepository;
#[cfg(test)]
pub use session::MockSessionRepository;
#[cfg(test)]
pub use token::MockTokenRepository;
#[cfg(test)]
pub use user::MockUserRepository;
