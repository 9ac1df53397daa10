//! Key-value settings store
//!
//! Small operational toggles that admins change at runtime without a
//! redeploy. Values are strings; callers parse what they need.

use sqlx::SqlitePool;

use lg_core::errors::{DomainError, DomainResult};
use lg_shared::config::{AccessPolicyConfig, GateRateLimitConfig};

pub struct SettingsStore {
    pool: SqlitePool,
}

impl SettingsStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(DomainError::database)
    }

    /// Get a setting, falling back to `default` when unset.
    pub async fn get_or(&self, key: &str, default: &str) -> DomainResult<String> {
        Ok(self.get(key).await?.unwrap_or_else(|| default.to_string()))
    }

    pub async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;
        Ok(())
    }

    pub async fn delete(&self, key: &str) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM settings WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(DomainError::database)?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply stored overrides to the rate-limit defaults.
    ///
    /// Only keys that are present and parse replace the defaults; everything
    /// else keeps the compiled-in value.
    pub async fn overlay_rate_limit(
        &self,
        mut config: GateRateLimitConfig,
    ) -> DomainResult<GateRateLimitConfig> {
        if let Some(v) = self.get_parsed("rate_limit_max_requests").await? {
            config.max_requests = v;
        }
        if let Some(v) = self.get_parsed("rate_limit_window_seconds").await? {
            config.window_seconds = v;
        }
        if let Some(v) = self.get_parsed("verification_max_attempts").await? {
            config.verification_max_attempts = v;
        }
        if let Some(v) = self.get_parsed("verification_window_seconds").await? {
            config.verification_window_seconds = v;
        }
        Ok(config)
    }

    /// Apply stored overrides to the access-policy defaults.
    pub async fn overlay_access_policy(
        &self,
        mut config: AccessPolicyConfig,
    ) -> DomainResult<AccessPolicyConfig> {
        if let Some(v) = self.get_parsed("bypass_threshold_seconds").await? {
            config.bypass_threshold_seconds = v;
        }
        if let Some(v) = self.get_parsed("session_duration_seconds").await? {
            config.session_duration_seconds = v;
        }
        if let Some(v) = self.get("verify_base_url").await? {
            config.verify_base_url = v;
        }
        Ok(config)
    }

    async fn get_parsed<T: std::str::FromStr>(&self, key: &str) -> DomainResult<Option<T>> {
        let value = self.get(key).await?;
        match value {
            Some(raw) => match raw.parse() {
                Ok(parsed) => Ok(Some(parsed)),
                Err(_) => {
                    tracing::warn!(key, value = %raw, "Ignoring unparseable setting override");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }
}
