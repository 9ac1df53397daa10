pub mod noop;
pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

pub use noop::NoOpEventLogRepository;
pub use r#trait::EventLogRepository;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockEventLogRepository;
