//! Unit tests for the verification engine

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::{Account, ChannelKind};
use crate::errors::{DomainError, VerificationError};
use crate::repositories::{
    AccountRepository, ChallengeRepository, MockAccountRepository, MockChallengeRepository,
};
use crate::services::verification::{VerificationConfig, VerificationEngine};

use super::mocks::MockGateway;

const PHONE: &str = "+15551234567";
const EMAIL: &str = "ada@example.com";

struct Fixture {
    challenges: Arc<MockChallengeRepository>,
    accounts: Arc<MockAccountRepository>,
    gateway: Arc<MockGateway>,
    engine: VerificationEngine<MockChallengeRepository, MockAccountRepository, MockGateway>,
}

fn fixture(gateway_fails: bool) -> Fixture {
    let challenges = Arc::new(MockChallengeRepository::new());
    let accounts = Arc::new(MockAccountRepository::new());
    let gateway = Arc::new(MockGateway::new(gateway_fails));
    let engine = VerificationEngine::new(
        challenges.clone(),
        accounts.clone(),
        gateway.clone(),
        VerificationConfig::default(),
    );
    Fixture {
        challenges,
        accounts,
        gateway,
        engine,
    }
}

async fn registered_phone_account(fx: &Fixture) -> Account {
    let account = Account::with_phone(
        PHONE.to_string(),
        "Ada".to_string(),
        "Lovelace".to_string(),
    );
    fx.accounts.create(account).await.unwrap()
}

async fn registered_email_account(fx: &Fixture) -> Account {
    let account = Account::with_email(
        EMAIL.to_string(),
        "Ada".to_string(),
        "Lovelace".to_string(),
    );
    fx.accounts.create(account).await.unwrap()
}

#[tokio::test]
async fn test_issue_creates_one_unverified_challenge_and_dispatches() {
    let fx = fixture(false);
    let account = registered_phone_account(&fx).await;

    let challenge = fx
        .engine
        .issue_challenge(&account, ChannelKind::Phone, PHONE)
        .await
        .unwrap();

    assert!(!challenge.is_verified);
    assert_eq!(challenge.owner_account_id, account.id);
    assert_eq!(fx.gateway.last_code(PHONE).as_deref(), Some(&*challenge.code));

    let stored = fx
        .challenges
        .find_by_channel(ChannelKind::Phone, PHONE)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.code, challenge.code);
}

#[tokio::test]
async fn test_issue_fails_when_dispatch_fails() {
    let fx = fixture(true);
    let account = registered_phone_account(&fx).await;

    let err = fx
        .engine
        .issue_challenge(&account, ChannelKind::Phone, PHONE)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::DispatchFailure {
            channel: ChannelKind::Phone
        })
    ));

    // The record persists before the send; a failed send leaves it
    // orphaned rather than rolled back.
    assert!(fx
        .challenges
        .find_by_channel(ChannelKind::Phone, PHONE)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_confirm_success_sets_account_flag_once() {
    let fx = fixture(false);
    let account = registered_phone_account(&fx).await;
    fx.engine
        .issue_challenge(&account, ChannelKind::Phone, PHONE)
        .await
        .unwrap();
    let code = fx.gateway.last_code(PHONE).unwrap();

    let verified = fx
        .engine
        .confirm(ChannelKind::Phone, PHONE, &code)
        .await
        .unwrap();
    assert!(verified.is_phone_verified);
    assert!(!verified.is_email_verified);

    // The same code cannot be used twice.
    let err = fx
        .engine
        .confirm(ChannelKind::Phone, PHONE, &code)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::AlreadyVerified {
            channel: ChannelKind::Phone
        })
    ));
}

#[tokio::test]
async fn test_confirm_wrong_code_is_invalid_credential_and_leaves_state() {
    let fx = fixture(false);
    let account = registered_phone_account(&fx).await;
    fx.engine
        .issue_challenge(&account, ChannelKind::Phone, PHONE)
        .await
        .unwrap();

    let err = fx
        .engine
        .confirm(ChannelKind::Phone, PHONE, "000000")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::InvalidCredential { .. })
    ));

    let stored = fx
        .challenges
        .find_by_channel(ChannelKind::Phone, PHONE)
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.is_verified);
    let account = fx.accounts.find_by_id(account.id).await.unwrap().unwrap();
    assert!(!account.is_phone_verified);
}

#[tokio::test]
async fn test_confirm_unknown_channel_is_same_error_as_wrong_code() {
    let fx = fixture(false);

    let err = fx
        .engine
        .confirm(ChannelKind::Phone, "+19990000000", "123456")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::InvalidCredential { .. })
    ));
}

#[tokio::test]
async fn test_confirm_after_ttl_is_expired_even_with_correct_code() {
    let fx = fixture(false);
    let account = registered_phone_account(&fx).await;
    let challenge = fx
        .engine
        .issue_challenge(&account, ChannelKind::Phone, PHONE)
        .await
        .unwrap();

    let mut stale = challenge.clone();
    stale.created_at = Utc::now() - Duration::minutes(11);
    fx.challenges.put(stale).await;

    let err = fx
        .engine
        .confirm(ChannelKind::Phone, PHONE, &challenge.code)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::Expired)
    ));

    // Expired challenges are rejected, not deleted.
    assert!(fx
        .challenges
        .find_by_channel(ChannelKind::Phone, PHONE)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_reissue_invalidates_old_code() {
    let fx = fixture(false);
    let account = registered_phone_account(&fx).await;
    let first = fx
        .engine
        .issue_challenge(&account, ChannelKind::Phone, PHONE)
        .await
        .unwrap();

    fx.engine.reissue(ChannelKind::Phone, PHONE).await.unwrap();
    let second_code = fx.gateway.last_code(PHONE).unwrap();

    // The old code is gone for good; only the new one confirms. Skip
    // the negative check on the rare collision of the two random codes.
    if first.code != second_code {
        let err = fx
            .engine
            .confirm(ChannelKind::Phone, PHONE, &first.code)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Verification(VerificationError::InvalidCredential { .. })
        ));
    }

    let verified = fx
        .engine
        .confirm(ChannelKind::Phone, PHONE, &second_code)
        .await
        .unwrap();
    assert!(verified.is_phone_verified);
}

#[tokio::test]
async fn test_reissue_unknown_channel_is_not_found() {
    let fx = fixture(false);

    let err = fx
        .engine
        .reissue(ChannelKind::Email, "nobody@example.com")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_reissue_verified_channel_is_rejected() {
    let fx = fixture(false);
    let account = registered_email_account(&fx).await;
    fx.engine
        .issue_challenge(&account, ChannelKind::Email, EMAIL)
        .await
        .unwrap();
    let code = fx.gateway.last_code(EMAIL).unwrap();
    fx.engine
        .confirm(ChannelKind::Email, EMAIL, &code)
        .await
        .unwrap();

    let err = fx.engine.reissue(ChannelKind::Email, EMAIL).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::AlreadyVerified {
            channel: ChannelKind::Email
        })
    ));
}

#[tokio::test]
async fn test_reissue_succeeds_even_when_dispatch_fails() {
    let challenges = Arc::new(MockChallengeRepository::new());
    let accounts = Arc::new(MockAccountRepository::new());

    // Issue through a working gateway first.
    let working = VerificationEngine::new(
        challenges.clone(),
        accounts.clone(),
        Arc::new(MockGateway::new(false)),
        VerificationConfig::default(),
    );
    let account = accounts
        .create(Account::with_phone(
            PHONE.to_string(),
            "Ada".to_string(),
            "Lovelace".to_string(),
        ))
        .await
        .unwrap();
    let first = working
        .issue_challenge(&account, ChannelKind::Phone, PHONE)
        .await
        .unwrap();

    // Then resend through a failing one: the call still succeeds.
    let failing = VerificationEngine::new(
        challenges.clone(),
        accounts.clone(),
        Arc::new(MockGateway::new(true)),
        VerificationConfig::default(),
    );
    let returned = failing.reissue(ChannelKind::Phone, PHONE).await.unwrap();
    assert_eq!(returned.id, account.id);

    // The old challenge is gone regardless, replaced by a fresh one.
    let stored = challenges
        .find_by_channel(ChannelKind::Phone, PHONE)
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.is_verified);
    assert_ne!(stored.created_at, first.created_at);
}

#[tokio::test]
async fn test_email_confirmation_sets_email_flag() {
    let fx = fixture(false);
    let account = registered_email_account(&fx).await;
    fx.engine
        .issue_challenge(&account, ChannelKind::Email, EMAIL)
        .await
        .unwrap();
    let code = fx.gateway.last_code(EMAIL).unwrap();

    let verified = fx
        .engine
        .confirm(ChannelKind::Email, EMAIL, &code)
        .await
        .unwrap();
    assert!(verified.is_email_verified);
    assert!(!verified.is_phone_verified);
}
