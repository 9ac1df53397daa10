use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entities::VerificationToken;
use crate::errors::{AccessError, DomainError};
use crate::repositories::MockTokenRepository;
use crate::services::verification::{VerificationConfig, VerificationTokenService};

fn service(repo: Arc<MockTokenRepository>) -> VerificationTokenService<MockTokenRepository> {
    VerificationTokenService::new(repo, VerificationConfig::default())
}

fn aged_token(user_id: i64, age_seconds: i64) -> VerificationToken {
    let mut token = VerificationToken::new(user_id);
    token.created_at = Utc::now() - Duration::seconds(age_seconds);
    token
}

fn assert_invalid<T: std::fmt::Debug>(result: Result<T, DomainError>) {
    match result {
        Err(DomainError::Access(AccessError::TokenInvalid)) => {}
        other => panic!("expected TokenInvalid, got {:?}", other),
    }
}

#[tokio::test]
async fn test_issue_persists_unused_token() {
    let repo = Arc::new(MockTokenRepository::new());
    let service = service(repo.clone());

    let token = service.issue(7).await.unwrap();

    let stored = repo.tokens.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].token, token.token);
    assert!(!stored[0].is_used);
}

#[tokio::test]
async fn test_slow_redemption_is_legitimate() {
    let token = aged_token(7, 40);
    let value = token.token.clone();
    let repo = Arc::new(MockTokenRepository::with_token(token));
    let service = service(repo.clone());

    let redemption = service.redeem(7, &value, Utc::now()).await.unwrap();

    assert!(!redemption.bypassed);
    assert!(redemption.elapsed_seconds >= 39.0);
    assert!(repo.bypass_log.lock().unwrap().is_empty());

    let stored = repo.tokens.lock().unwrap();
    assert!(stored[0].is_used);
    assert!(!stored[0].is_bypassed);
    assert!(stored[0].redeemed_at.is_some());
}

#[tokio::test]
async fn test_fast_redemption_is_bypassed_and_logged() {
    let token = aged_token(7, 5);
    let value = token.token.clone();
    let repo = Arc::new(MockTokenRepository::with_token(token));
    let service = service(repo.clone());

    let redemption = service.redeem(7, &value, Utc::now()).await.unwrap();

    assert!(redemption.bypassed);
    let log = repo.bypass_log.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].user_id, 7);
    assert!(log[0].elapsed_seconds < 35.0);

    // A bypassed redemption still consumes the token.
    let stored = repo.tokens.lock().unwrap();
    assert!(stored[0].is_used);
    assert!(stored[0].is_bypassed);
}

#[tokio::test]
async fn test_redemption_exactly_at_threshold_is_legitimate() {
    let now = Utc::now();
    let mut token = VerificationToken::new(7);
    token.created_at = now - Duration::seconds(35);
    let value = token.token.clone();
    let service = service(Arc::new(MockTokenRepository::with_token(token)));

    let redemption = service.redeem(7, &value, now).await.unwrap();
    assert!(!redemption.bypassed);
}

#[tokio::test]
async fn test_unknown_token_is_invalid() {
    let service = service(Arc::new(MockTokenRepository::new()));
    assert_invalid(service.redeem(7, "deadbeef", Utc::now()).await);
}

#[tokio::test]
async fn test_foreign_user_cannot_redeem() {
    let token = aged_token(7, 40);
    let value = token.token.clone();
    let repo = Arc::new(MockTokenRepository::with_token(token));
    let service = service(repo.clone());

    assert_invalid(service.redeem(8, &value, Utc::now()).await);

    // The owner's token survives the foreign attempt untouched.
    assert!(!repo.tokens.lock().unwrap()[0].is_used);
}

#[tokio::test]
async fn test_replay_is_invalid() {
    let token = aged_token(7, 40);
    let value = token.token.clone();
    let service = service(Arc::new(MockTokenRepository::with_token(token)));

    service.redeem(7, &value, Utc::now()).await.unwrap();
    assert_invalid(service.redeem(7, &value, Utc::now()).await);
}

#[tokio::test]
async fn test_attach_short_url() {
    let repo = Arc::new(MockTokenRepository::new());
    let service = service(repo.clone());

    let token = service.issue(7).await.unwrap();
    service
        .attach_short_url(&token.token, "https://sho.rt/abc")
        .await
        .unwrap();

    let stored = repo.tokens.lock().unwrap();
    assert_eq!(stored[0].short_url.as_deref(), Some("https://sho.rt/abc"));
}
