//! Time-bounded access sessions

mod service;

pub use service::SessionService;
