//! Services implementing the access-control pipeline

pub mod access;
pub mod maintenance;
pub mod membership;
pub mod rate_limit;
pub mod session;
pub mod verification;

pub use access::{
    AccessOutcome, AccessService, AlertSeverity, DeliveryReport, OperatorAlerts, Requester,
    UrlShortener,
};
pub use maintenance::{MaintenanceConfig, MaintenanceService, SweepReport};
pub use membership::{ChannelMembership, ChatGateway, MemberRole, MembershipService};
pub use rate_limit::{ActionClass, RateLimitDecision, RateLimiter, SlidingWindowRateLimiter};
pub use session::SessionService;
pub use verification::{Redemption, VerificationConfig, VerificationTokenService};
