use chrono::{Duration, Utc};

use frontdesk_domain::channel::Channel;
use frontdesk_domain::id::SessionId;
use frontdesk_intake::domain::types::{OTC_TTL_SECS, OtcVerdict};
use frontdesk_intake::usecase::otc::OtcManager;

use crate::helpers::{MemorySessionStore, RecordingNotifier};

const EMAIL: &str = "asha@example.com";

#[tokio::test]
async fn should_validate_issued_code_until_expiry() {
    let sessions = MemorySessionStore::new();
    let notifier = RecordingNotifier::email_only();
    let otc = OtcManager {
        sessions: &sessions,
        notifier: &notifier,
    };
    let session = SessionId::new();
    let now = Utc::now();

    let issued = otc.issue_at(session, EMAIL, now).await.unwrap();
    assert!(issued.dispatched);
    let code = issued.challenge.code;

    let at_expiry = now + Duration::seconds(OTC_TTL_SECS);
    let verdict = otc.validate_at(session, EMAIL, &code, at_expiry).await.unwrap();
    assert_eq!(verdict, OtcVerdict::Valid);

    let past_expiry = now + Duration::seconds(OTC_TTL_SECS + 1);
    let verdict = otc.validate_at(session, EMAIL, &code, past_expiry).await.unwrap();
    assert_eq!(verdict, OtcVerdict::Expired);
}

#[tokio::test]
async fn should_email_the_code_to_the_visitor() {
    let sessions = MemorySessionStore::new();
    let notifier = RecordingNotifier::email_only();
    let otc = OtcManager {
        sessions: &sessions,
        notifier: &notifier,
    };

    let issued = otc.issue(SessionId::new(), EMAIL).await.unwrap();

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].channel, Channel::Email);
    assert_eq!(sent[0].recipient, EMAIL);
    assert!(sent[0].body.contains(&issued.challenge.code));
}

#[tokio::test]
async fn should_reject_code_for_a_different_email() {
    let sessions = MemorySessionStore::new();
    let notifier = RecordingNotifier::email_only();
    let otc = OtcManager {
        sessions: &sessions,
        notifier: &notifier,
    };
    let session = SessionId::new();

    let code = otc.issue(session, EMAIL).await.unwrap().challenge.code;

    let verdict = otc
        .validate(session, "someone@example.com", &code)
        .await
        .unwrap();
    assert_eq!(verdict, OtcVerdict::Mismatch);
    // Email comparison is exact.
    let verdict = otc
        .validate(session, "Asha@example.com", &code)
        .await
        .unwrap();
    assert_eq!(verdict, OtcVerdict::Mismatch);
}

#[tokio::test]
async fn should_invalidate_previous_code_on_reissue() {
    let sessions = MemorySessionStore::new();
    let notifier = RecordingNotifier::email_only();
    let otc = OtcManager {
        sessions: &sessions,
        notifier: &notifier,
    };
    let session = SessionId::new();

    let first = otc.issue(session, EMAIL).await.unwrap().challenge.code;
    let second = otc.issue(session, EMAIL).await.unwrap().challenge.code;

    let verdict = otc.validate(session, EMAIL, &second).await.unwrap();
    assert_eq!(verdict, OtcVerdict::Valid);
    if first != second {
        let verdict = otc.validate(session, EMAIL, &first).await.unwrap();
        assert_eq!(verdict, OtcVerdict::Mismatch);
    }
}

#[tokio::test]
async fn should_keep_code_valid_after_successful_check() {
    let sessions = MemorySessionStore::new();
    let notifier = RecordingNotifier::email_only();
    let otc = OtcManager {
        sessions: &sessions,
        notifier: &notifier,
    };
    let session = SessionId::new();
    let code = otc.issue(session, EMAIL).await.unwrap().challenge.code;

    for _ in 0..2 {
        let verdict = otc.validate(session, EMAIL, &code).await.unwrap();
        assert_eq!(verdict, OtcVerdict::Valid);
    }
}

#[tokio::test]
async fn should_report_missing_challenge() {
    let sessions = MemorySessionStore::new();
    let notifier = RecordingNotifier::email_only();
    let otc = OtcManager {
        sessions: &sessions,
        notifier: &notifier,
    };
    let session = SessionId::new();

    let verdict = otc.validate(session, EMAIL, "123456").await.unwrap();
    assert_eq!(verdict, OtcVerdict::NoChallenge);

    otc.issue(session, EMAIL).await.unwrap();
    otc.clear(session).await.unwrap();
    let verdict = otc.validate(session, EMAIL, "123456").await.unwrap();
    assert_eq!(verdict, OtcVerdict::NoChallenge);
}

#[tokio::test]
async fn should_store_challenge_even_when_email_is_not_dispatched() {
    let sessions = MemorySessionStore::new();
    let notifier = RecordingNotifier::unconfigured();
    let otc = OtcManager {
        sessions: &sessions,
        notifier: &notifier,
    };
    let session = SessionId::new();

    let issued = otc.issue(session, EMAIL).await.unwrap();

    assert!(!issued.dispatched);
    assert_eq!(sessions.challenge(session), Some(issued.challenge));
}

#[tokio::test]
async fn should_scope_challenges_to_their_session() {
    let sessions = MemorySessionStore::new();
    let notifier = RecordingNotifier::email_only();
    let otc = OtcManager {
        sessions: &sessions,
        notifier: &notifier,
    };
    let code = otc.issue(SessionId::new(), EMAIL).await.unwrap().challenge.code;

    let verdict = otc.validate(SessionId::new(), EMAIL, &code).await.unwrap();
    assert_eq!(verdict, OtcVerdict::NoChallenge);
}
