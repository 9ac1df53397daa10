//! SQLite storage for the authoritative store

pub mod connection;
pub mod repositories;
pub mod settings;

pub use connection::DatabasePool;
pub use settings::SettingsStore;
