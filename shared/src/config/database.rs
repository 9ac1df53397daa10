//! Database connection configuration

use serde::{Deserialize, Serialize};

/// Connection settings for the authoritative SQLite store.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Connection URL, e.g. `sqlite://linkgate.db`
    #[serde(default = "default_url")]
    pub url: String,

    /// Maximum number of pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_url() -> String {
    "sqlite://linkgate.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}
