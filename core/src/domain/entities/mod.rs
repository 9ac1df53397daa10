//! Domain entities

pub mod channel;
pub mod link;
pub mod session;
pub mod user;
pub mod verification_token;

pub use channel::ForceJoinChannel;
pub use link::{ContentLink, LinkKind};
pub use session::Session;
pub use user::User;
pub use verification_token::VerificationToken;
