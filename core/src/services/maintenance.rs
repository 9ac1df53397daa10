//! Periodic housekeeping sweep
//!
//! Deactivates expired sessions, deletes stale unused tokens, prunes old
//! analytics events, and evicts idle rate-limiter entries. Correctness never
//! depends on the sweep; read paths re-check expiry on their own.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::repositories::{
    EventLogRepository, NoOpEventLogRepository, SessionRepository, TokenRepository,
};
use crate::services::rate_limit::SlidingWindowRateLimiter;

/// Sweep scheduling and retention knobs.
#[derive(Debug, Clone)]
pub struct MaintenanceConfig {
    pub enabled: bool,

    /// Seconds between sweeps
    pub interval_seconds: u64,

    /// Unused tokens older than this are deleted
    pub token_max_age_days: i64,

    /// Analytics events older than this are pruned
    pub event_retention_days: i64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: 3600,
            token_max_age_days: 1,
            event_retention_days: 90,
        }
    }
}

/// What one sweep accomplished.
///
/// Failures of individual steps are collected rather than aborting the
/// sweep; one broken table must not stop the others from being cleaned.
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    pub sessions_deactivated: usize,
    pub tokens_deleted: usize,
    pub events_pruned: usize,
    pub rate_entries_pruned: usize,
    pub errors: Vec<String>,
}

impl SweepReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs the housekeeping sweep, either on demand or on a timer.
pub struct MaintenanceService<S, T, E = NoOpEventLogRepository>
where
    S: SessionRepository + 'static,
    T: TokenRepository + 'static,
    E: EventLogRepository + 'static,
{
    sessions: Arc<S>,
    tokens: Arc<T>,
    events: Option<Arc<E>>,
    rate_limiter: Option<Arc<SlidingWindowRateLimiter>>,
    config: MaintenanceConfig,
}

/// Handle to a running background sweep task.
pub struct MaintenanceHandle {
    notify: Arc<Notify>,
    task: JoinHandle<()>,
}

impl MaintenanceHandle {
    /// Stop the background task and wait for it to finish.
    pub async fn shutdown(self) {
        self.notify.notify_one();
        let _ = self.task.await;
    }
}

impl<S, T> MaintenanceService<S, T>
where
    S: SessionRepository + 'static,
    T: TokenRepository + 'static,
{
    pub fn new(sessions: Arc<S>, tokens: Arc<T>, config: MaintenanceConfig) -> Self {
        Self {
            sessions,
            tokens,
            events: None,
            rate_limiter: None,
            config,
        }
    }
}

impl<S, T, E> MaintenanceService<S, T, E>
where
    S: SessionRepository + 'static,
    T: TokenRepository + 'static,
    E: EventLogRepository + 'static,
{
    /// Include the analytics event log in the sweep.
    pub fn with_event_log<E2: EventLogRepository + 'static>(
        self,
        events: Arc<E2>,
    ) -> MaintenanceService<S, T, E2> {
        MaintenanceService {
            sessions: self.sessions,
            tokens: self.tokens,
            events: Some(events),
            rate_limiter: self.rate_limiter,
            config: self.config,
        }
    }

    /// Include the in-memory rate limiter in the sweep.
    pub fn with_rate_limiter(mut self, limiter: Arc<SlidingWindowRateLimiter>) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    /// Run one sweep at `now`.
    pub async fn run_sweep(&self, now: DateTime<Utc>) -> SweepReport {
        let mut report = SweepReport::default();

        match self.sessions.deactivate_expired(now).await {
            Ok(count) => report.sessions_deactivated = count,
            Err(e) => report.errors.push(format!("session sweep: {}", e)),
        }

        let token_cutoff = now - Duration::days(self.config.token_max_age_days);
        match self.tokens.delete_stale_unused(token_cutoff).await {
            Ok(count) => report.tokens_deleted = count,
            Err(e) => report.errors.push(format!("token sweep: {}", e)),
        }

        if let Some(events) = &self.events {
            let event_cutoff = now - Duration::days(self.config.event_retention_days);
            match events.prune_older_than(event_cutoff).await {
                Ok(count) => report.events_pruned = count,
                Err(e) => report.errors.push(format!("event sweep: {}", e)),
            }
        }

        if let Some(limiter) = &self.rate_limiter {
            report.rate_entries_pruned = limiter.purge_stale(now);
        }

        if report.is_clean() {
            tracing::info!(
                sessions = report.sessions_deactivated,
                tokens = report.tokens_deleted,
                events = report.events_pruned,
                rate_entries = report.rate_entries_pruned,
                event = "maintenance_sweep",
                "Housekeeping sweep completed"
            );
        } else {
            tracing::error!(
                errors = ?report.errors,
                event = "maintenance_sweep_degraded",
                "Housekeeping sweep completed with errors"
            );
        }

        report
    }

    /// Start the periodic sweep on the current runtime.
    ///
    /// The first sweep runs immediately; subsequent sweeps follow the
    /// configured interval until the handle is shut down.
    pub fn spawn(self: Arc<Self>) -> MaintenanceHandle {
        let notify = Arc::new(Notify::new());
        let stop = notify.clone();

        let task = tokio::spawn(async move {
            if !self.config.enabled {
                stop.notified().await;
                return;
            }

            let mut ticker =
                tokio::time::interval(std::time::Duration::from_secs(self.config.interval_seconds));
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        self.run_sweep(Utc::now()).await;
                    }
                    _ = stop.notified() => break,
                }
            }
        });

        MaintenanceHandle { notify, task }
    }
}
