//! The access controller state machine

use std::sync::Arc;

use chrono::{DateTime, Utc};

use lg_shared::config::AccessPolicyConfig;
use lg_shared::types::common::UserId;

use crate::domain::entities::{ContentLink, LinkKind, Session};
use crate::errors::{AccessError, DomainError, DomainResult};
use crate::repositories::{
    ChannelRepository, EventLogRepository, LinkRepository, NoOpEventLogRepository,
    SessionRepository, TokenRepository, UserRepository,
};
use crate::services::membership::{ChatGateway, MembershipService};
use crate::services::rate_limit::{ActionClass, RateLimitDecision, RateLimiter};
use crate::services::session::SessionService;
use crate::services::verification::{VerificationConfig, VerificationTokenService};

use super::pending::{PendingRequest, PendingRequestStore};
use super::traits::{AlertSeverity, OperatorAlerts, UrlShortener};
use super::types::{AccessOutcome, DeliveryReport, Requester};

/// Orchestrates the gating pipeline for content requests.
///
/// Collaborators are injected through trait bounds so transports and stores
/// can be swapped wholesale in tests. Pending-request state is process-local;
/// everything durable lives behind the repositories.
pub struct AccessService<R, G, T, S, C, L, U, Sh, A, E = NoOpEventLogRepository>
where
    R: RateLimiter,
    G: ChatGateway,
    T: TokenRepository,
    S: SessionRepository,
    C: ChannelRepository,
    L: LinkRepository,
    U: UserRepository,
    Sh: UrlShortener,
    A: OperatorAlerts,
    E: EventLogRepository,
{
    rate_limiter: Arc<R>,
    gateway: Arc<G>,
    membership: MembershipService<G>,
    verification: VerificationTokenService<T>,
    sessions: SessionService<S>,
    channels: Arc<C>,
    links: Arc<L>,
    users: Arc<U>,
    shortener: Arc<Sh>,
    alerts: Arc<A>,
    events: Option<Arc<E>>,
    pending: PendingRequestStore,
    config: AccessPolicyConfig,
}

impl<R, G, T, S, C, L, U, Sh, A> AccessService<R, G, T, S, C, L, U, Sh, A>
where
    R: RateLimiter,
    G: ChatGateway,
    T: TokenRepository,
    S: SessionRepository,
    C: ChannelRepository,
    L: LinkRepository,
    U: UserRepository,
    Sh: UrlShortener,
    A: OperatorAlerts,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        rate_limiter: Arc<R>,
        gateway: Arc<G>,
        tokens: Arc<T>,
        sessions: Arc<S>,
        channels: Arc<C>,
        links: Arc<L>,
        users: Arc<U>,
        shortener: Arc<Sh>,
        alerts: Arc<A>,
        config: AccessPolicyConfig,
    ) -> Self {
        let verification = VerificationTokenService::new(
            tokens,
            VerificationConfig {
                bypass_threshold_seconds: config.bypass_threshold_seconds as f64,
            },
        );
        let sessions = SessionService::new(sessions, config.session_duration_seconds);

        Self {
            rate_limiter,
            membership: MembershipService::new(gateway.clone()),
            gateway,
            verification,
            sessions,
            channels,
            links,
            users,
            shortener,
            alerts,
            events: None,
            pending: PendingRequestStore::new(),
            config,
        }
    }
}

impl<R, G, T, S, C, L, U, Sh, A, E> AccessService<R, G, T, S, C, L, U, Sh, A, E>
where
    R: RateLimiter,
    G: ChatGateway,
    T: TokenRepository,
    S: SessionRepository,
    C: ChannelRepository,
    L: LinkRepository,
    U: UserRepository,
    Sh: UrlShortener,
    A: OperatorAlerts,
    E: EventLogRepository,
{
    /// Attach an event log for usage analytics.
    pub fn with_event_log<E2: EventLogRepository>(
        self,
        events: Arc<E2>,
    ) -> AccessService<R, G, T, S, C, L, U, Sh, A, E2> {
        AccessService {
            rate_limiter: self.rate_limiter,
            gateway: self.gateway,
            membership: self.membership,
            verification: self.verification,
            sessions: self.sessions,
            channels: self.channels,
            links: self.links,
            users: self.users,
            shortener: self.shortener,
            alerts: self.alerts,
            events: Some(events),
            pending: self.pending,
            config: self.config,
        }
    }

    /// Handle a content request by link id.
    pub async fn request(
        &self,
        requester: &Requester,
        link_id: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<AccessOutcome> {
        if let RateLimitDecision::Denied {
            retry_after_seconds,
        } = self
            .rate_limiter
            .check(requester.id, ActionClass::LinkAccess, now)
            .await
        {
            return Ok(AccessOutcome::Denied {
                reason: AccessError::RateLimited {
                    retry_after_seconds,
                },
            });
        }

        self.users
            .record_contact(
                requester.id,
                requester.username.as_deref(),
                requester.full_name.as_deref(),
            )
            .await?;
        self.log_event(
            "link_access",
            requester.id,
            serde_json::json!({ "link_id": link_id }),
        )
        .await;

        let link = match self.links.find(link_id).await? {
            Some(link) => link,
            None => {
                tracing::info!(
                    user_id = requester.id,
                    link_id,
                    event = "unknown_link",
                    "Request for unknown link"
                );
                return Ok(AccessOutcome::Denied {
                    reason: AccessError::InvalidReference,
                });
            }
        };

        // Fast path: a live session skips membership and verification.
        if self.sessions.active(requester.id, now).await?.is_some() {
            return self.deliver_outcome(requester.id, &link, now).await;
        }

        let channels = self.channels.active_channels().await?;
        let evaluation = self.membership.evaluate(requester.id, &channels).await;
        self.pending.put(
            requester.id,
            PendingRequest {
                link_id: link.link_id.clone(),
                is_batch: link.is_batch(),
                token: None,
            },
        );

        if !MembershipService::<G>::all_joined(&evaluation) {
            return Ok(AccessOutcome::JoinRequired {
                channels: evaluation,
            });
        }

        self.begin_verification(requester.id, now).await
    }

    /// Issue a verification challenge for the user's pending request.
    pub async fn begin_verification(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<AccessOutcome> {
        if self.pending.get(user_id).is_none() {
            return Ok(AccessOutcome::NoPendingRequest);
        }

        if let RateLimitDecision::Denied {
            retry_after_seconds,
        } = self
            .rate_limiter
            .check(user_id, ActionClass::Verification, now)
            .await
        {
            return Ok(AccessOutcome::Denied {
                reason: AccessError::RateLimited {
                    retry_after_seconds,
                },
            });
        }

        match self.issue_challenge(user_id).await? {
            Some(short_url) => Ok(AccessOutcome::VerificationRequired { short_url }),
            None => Ok(AccessOutcome::VerificationUnavailable),
        }
    }

    /// Ask for a fresh challenge after a degraded or abandoned attempt.
    pub async fn retry_verification(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<AccessOutcome> {
        self.begin_verification(user_id, now).await
    }

    /// Re-issue a challenge for the same pending request, replacing the one
    /// currently out.
    pub async fn verify_again(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<AccessOutcome> {
        self.begin_verification(user_id, now).await
    }

    /// Re-evaluate membership after the user claims to have joined.
    pub async fn recheck_join(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<AccessOutcome> {
        if self.pending.get(user_id).is_none() {
            return Ok(AccessOutcome::NoPendingRequest);
        }

        let channels = self.channels.active_channels().await?;
        let evaluation = self.membership.evaluate(user_id, &channels).await;
        if !MembershipService::<G>::all_joined(&evaluation) {
            return Ok(AccessOutcome::JoinRequired {
                channels: evaluation,
            });
        }

        self.begin_verification(user_id, now).await
    }

    /// Redeem a verification token, granting a session on success.
    ///
    /// A redemption without a pending request still grants the session; the
    /// user simply has nothing queued for delivery.
    pub async fn redeem(
        &self,
        user_id: UserId,
        token: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<AccessOutcome> {
        let redemption = match self.verification.redeem(user_id, token, now).await {
            Ok(redemption) => redemption,
            Err(DomainError::Access(AccessError::TokenInvalid)) => {
                return Ok(AccessOutcome::Denied {
                    reason: AccessError::TokenInvalid,
                });
            }
            Err(e) => return Err(e),
        };

        if redemption.bypassed {
            self.log_event(
                "bypass_detected",
                user_id,
                serde_json::json!({ "elapsed_seconds": redemption.elapsed_seconds }),
            )
            .await;

            // Offer a fresh challenge when a request is still pending and
            // the verification window allows another attempt.
            let short_url = if self.pending.get(user_id).is_some() {
                match self
                    .rate_limiter
                    .check(user_id, ActionClass::Verification, now)
                    .await
                {
                    RateLimitDecision::Permitted => self.issue_challenge(user_id).await?,
                    RateLimitDecision::Denied { .. } => None,
                }
            } else {
                None
            };
            return Ok(AccessOutcome::BypassDetected { short_url });
        }

        self.sessions.grant(user_id, now).await?;
        self.log_event("session_granted", user_id, serde_json::json!({})).await;

        let delivery = match self.pending.take(user_id) {
            Some(pending) => match self.links.find(&pending.link_id).await? {
                Some(link) => match self.deliver(user_id, &link, now).await {
                    Ok(report) => Some(report),
                    Err(DomainError::Access(reason)) => {
                        return Ok(AccessOutcome::Denied { reason });
                    }
                    Err(e) => return Err(e),
                },
                None => None,
            },
            None => None,
        };

        Ok(AccessOutcome::Granted { delivery })
    }

    /// The user's live session at `now`, for status display.
    pub async fn session_status(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Session>> {
        self.sessions.active(user_id, now).await
    }

    /// Time left on the user's live session, if any.
    pub async fn time_remaining(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<chrono::Duration>> {
        self.sessions.time_remaining(user_id, now).await
    }

    /// Revoke the user's session on request.
    pub async fn revoke_session(&self, user_id: UserId) -> DomainResult<usize> {
        self.pending.take(user_id);
        self.sessions.revoke(user_id).await
    }

    async fn deliver_outcome(
        &self,
        user_id: UserId,
        link: &ContentLink,
        now: DateTime<Utc>,
    ) -> DomainResult<AccessOutcome> {
        match self.deliver(user_id, link, now).await {
            Ok(report) => Ok(AccessOutcome::Granted {
                delivery: Some(report),
            }),
            Err(DomainError::Access(reason)) => Ok(AccessOutcome::Denied { reason }),
            Err(e) => Err(e),
        }
    }

    /// Copy the link's content to the user's chat.
    ///
    /// Batch deliveries skip failed items and report the counts; a delivery
    /// where nothing arrived is a failure.
    async fn deliver(
        &self,
        user_id: UserId,
        link: &ContentLink,
        now: DateTime<Utc>,
    ) -> DomainResult<DeliveryReport> {
        let report = match link.kind {
            LinkKind::Single {
                channel_id,
                message_id,
            } => match self.gateway.copy_message(channel_id, message_id, user_id).await {
                Ok(_) => DeliveryReport {
                    requested: 1,
                    delivered: 1,
                    failed: 0,
                },
                Err(e) => {
                    tracing::error!(
                        user_id,
                        link_id = %link.link_id,
                        error = %e,
                        event = "delivery_failed",
                        "Message copy failed"
                    );
                    return Err(AccessError::ContentUnavailable.into());
                }
            },
            LinkKind::Batch {
                channel_id,
                start_msg_id,
                end_msg_id,
            } => {
                let mut delivered = 0;
                let mut failed = 0;
                for message_id in start_msg_id..=end_msg_id {
                    match self.gateway.copy_message(channel_id, message_id, user_id).await {
                        Ok(_) => delivered += 1,
                        Err(e) => {
                            failed += 1;
                            tracing::warn!(
                                user_id,
                                link_id = %link.link_id,
                                message_id,
                                error = %e,
                                event = "batch_item_skipped",
                                "Skipping undeliverable batch item"
                            );
                        }
                    }
                }
                if delivered == 0 {
                    return Err(AccessError::ContentUnavailable.into());
                }
                DeliveryReport {
                    requested: link.item_count(),
                    delivered,
                    failed,
                }
            }
        };

        self.links.record_use(&link.link_id, now).await?;
        self.log_event(
            "content_delivered",
            user_id,
            serde_json::json!({
                "link_id": link.link_id,
                "delivered": report.delivered,
                "failed": report.failed,
            }),
        )
        .await;

        Ok(report)
    }

    /// Issue a token and obtain its shortened challenge link.
    ///
    /// `None` means the shortener was unavailable: the pending request is
    /// retained and the unused token is left for the maintenance sweep.
    async fn issue_challenge(&self, user_id: UserId) -> DomainResult<Option<String>> {
        let token = self.verification.issue(user_id).await?;
        let long_url = self.config.verification_url(&token.token);

        match self.shortener.shorten(&long_url).await {
            Some(short_url) => {
                self.verification
                    .attach_short_url(&token.token, &short_url)
                    .await?;
                self.pending.set_token(user_id, &token.token);
                Ok(Some(short_url))
            }
            None => {
                tracing::error!(
                    user_id,
                    event = "shortener_unavailable",
                    "Could not shorten verification URL"
                );
                self.alerts
                    .notify(
                        "URL shortener is unreachable; verification links cannot be issued",
                        AlertSeverity::Error,
                    )
                    .await;
                Ok(None)
            }
        }
    }

    /// Best-effort analytics append; failures are logged and swallowed.
    async fn log_event(&self, event_type: &str, user_id: UserId, data: serde_json::Value) {
        if let Some(events) = &self.events {
            if let Err(e) = events.append(event_type, user_id, data).await {
                tracing::warn!(
                    event_type,
                    user_id,
                    error = %e,
                    "Event log append failed"
                );
            }
        }
    }
}
