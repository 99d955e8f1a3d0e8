use chrono::{Duration, Utc};

use frontdesk_domain::channel::Channel;
use frontdesk_domain::id::SessionId;
use frontdesk_domain::visit::VisitStatus;
use frontdesk_intake::domain::types::OtcChallenge;
use frontdesk_intake::error::IntakeServiceError;
use frontdesk_intake::usecase::intake::{CodeRequestOutcome, IntakeOutcome};
use frontdesk_intake::usecase::otc::OTC_SESSION_KEY;
use frontdesk_intake::usecase::tracker::ACTIVE_VISIT_KEY;

use crate::helpers::{
    FlakySessionStore, Harness, MockVisitRepo, RecordingNotifier, employee, flaky_intake, form,
    harness,
};

const EMAIL: &str = "asha@example.com";

fn staff() -> Vec<frontdesk_intake::domain::types::Employee> {
    let mut former = employee("Joan Former");
    former.active = false;
    vec![
        employee("Maria Lopez"),
        employee("John Carter"),
        former,
        employee("Priya Nair"),
    ]
}

async fn request_code(h: &Harness, session: SessionId) -> String {
    let outcome = h.usecase.request_code(session, EMAIL).await.unwrap();
    assert!(matches!(outcome, CodeRequestOutcome::Sent));
    h.sessions.challenge(session).expect("challenge stored").code
}

#[tokio::test]
async fn should_complete_intake_and_alert_host() {
    let h = harness(staff(), RecordingNotifier::email_only());
    let session = SessionId::new();
    let code = request_code(&h, session).await;

    let outcome = h
        .usecase
        .submit(session, form(EMAIL, "John Carter", &code))
        .await
        .unwrap();

    let IntakeOutcome::Completed(visit) = outcome else {
        panic!("expected completed intake, got {outcome:?}");
    };
    assert_eq!(visit.status, VisitStatus::Ongoing);
    assert!(visit.is_open());
    assert!(visit.sms_sent_at.is_some());
    assert_eq!(visit.purpose, "Interview");

    let stored = h.visits.get(visit.id).unwrap();
    assert_eq!(stored.sms_sent_at, visit.sms_sent_at);
    let visitors = h.visits.visitors.lock().unwrap().clone();
    assert_eq!(visitors.len(), 1);
    assert_eq!(visitors[0].phone, "+919876543210");
    assert_eq!(visitors[0].id, visit.visitor_id);

    let sent = h.notifier.sent();
    assert_eq!(sent.len(), 2);
    let alert = &sent[1];
    assert_eq!(alert.channel, Channel::Email);
    assert_eq!(alert.recipient, "john.carter@acme.com");
    assert!(alert.body.contains("Asha Rao"));
    assert!(alert.body.contains("+919876543210"));
    assert!(alert.body.contains("Interview"));

    assert!(h.sessions.raw(session, OTC_SESSION_KEY).is_none());
    assert_eq!(
        h.sessions.raw(session, ACTIVE_VISIT_KEY),
        Some(serde_json::to_value(visit.id).unwrap())
    );
}

#[tokio::test]
async fn should_resolve_host_by_name_fragment() {
    let employees = staff();
    let john = employees[1].clone();
    let h = harness(employees, RecordingNotifier::email_only());
    let session = SessionId::new();
    let code = request_code(&h, session).await;

    let outcome = h
        .usecase
        .submit(session, form(EMAIL, "joh", &code))
        .await
        .unwrap();

    let IntakeOutcome::Completed(visit) = outcome else {
        panic!("expected completed intake");
    };
    assert_eq!(visit.employee_id, john.id);
    assert_eq!(h.notifier.sent()[1].recipient, john.email);
}

#[tokio::test]
async fn should_prefer_exact_name_over_earlier_fragment_match() {
    let employees = vec![employee("Alice Jones"), employee("Jo")];
    let jo = employees[1].clone();
    let h = harness(employees, RecordingNotifier::email_only());
    let session = SessionId::new();
    let code = request_code(&h, session).await;

    let outcome = h
        .usecase
        .submit(session, form(EMAIL, "JO", &code))
        .await
        .unwrap();

    let IntakeOutcome::Completed(visit) = outcome else {
        panic!("expected completed intake");
    };
    assert_eq!(visit.employee_id, jo.id);
}

#[tokio::test]
async fn should_ignore_inactive_hosts() {
    let h = harness(staff(), RecordingNotifier::email_only());
    let session = SessionId::new();
    let code = request_code(&h, session).await;

    let err = h
        .usecase
        .submit(session, form(EMAIL, "Joan Former", &code))
        .await
        .unwrap_err();

    assert!(matches!(err, IntakeServiceError::HostNotResolved));
    assert!(h.visits.visits.lock().unwrap().is_empty());
    // The code was not consumed by the failed attempt.
    assert!(h.sessions.challenge(session).is_some());
}

#[tokio::test]
async fn should_reissue_code_after_mismatch() {
    let h = harness(staff(), RecordingNotifier::email_only());
    let session = SessionId::new();
    let code = request_code(&h, session).await;
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let err = h
        .usecase
        .submit(session, form(EMAIL, "John Carter", wrong))
        .await
        .unwrap_err();

    assert!(matches!(err, IntakeServiceError::ChallengeMismatch));
    assert!(h.visits.visits.lock().unwrap().is_empty());
    let sent = h.notifier.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|m| m.recipient == EMAIL));
    let fresh = h.sessions.challenge(session).unwrap();
    assert!(sent[1].body.contains(&fresh.code));
}

#[tokio::test]
async fn should_reissue_code_after_expiry() {
    let h = harness(staff(), RecordingNotifier::email_only());
    let session = SessionId::new();
    let stale = OtcChallenge {
        email: EMAIL.to_owned(),
        code: "424242".to_owned(),
        expires_at: Utc::now() - Duration::seconds(1),
    };
    h.sessions
        .put(session, OTC_SESSION_KEY, serde_json::to_value(&stale).unwrap());

    let err = h
        .usecase
        .submit(session, form(EMAIL, "John Carter", "424242"))
        .await
        .unwrap_err();

    assert!(matches!(err, IntakeServiceError::ChallengeExpired));
    let fresh = h.sessions.challenge(session).unwrap();
    assert!(fresh.expires_at > Utc::now());
    assert_eq!(h.notifier.sent().len(), 1);
}

#[tokio::test]
async fn should_issue_code_when_none_was_requested() {
    let h = harness(staff(), RecordingNotifier::email_only());
    let session = SessionId::new();

    let err = h
        .usecase
        .submit(session, form(EMAIL, "John Carter", "123456"))
        .await
        .unwrap_err();

    assert!(matches!(err, IntakeServiceError::NoChallenge));
    assert!(h.sessions.challenge(session).is_some());
}

#[tokio::test]
async fn should_report_dispatch_failure_when_reissue_is_rejected() {
    let h = harness(staff(), RecordingNotifier::unconfigured());
    let session = SessionId::new();

    let err = h
        .usecase
        .submit(session, form(EMAIL, "John Carter", "123456"))
        .await
        .unwrap_err();

    assert!(matches!(err, IntakeServiceError::DispatchUnavailable));
}

#[tokio::test]
async fn should_report_dispatch_failure_on_code_request() {
    let h = harness(staff(), RecordingNotifier::unconfigured());

    let err = h
        .usecase
        .request_code(SessionId::new(), EMAIL)
        .await
        .unwrap_err();

    assert!(matches!(err, IntakeServiceError::DispatchUnavailable));
}

#[tokio::test]
async fn should_require_email_before_issuing_code() {
    let h = harness(staff(), RecordingNotifier::email_only());

    let err = h
        .usecase
        .request_code(SessionId::new(), "   ")
        .await
        .unwrap_err();
    let IntakeServiceError::Validation(fields) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(fields["email"], "Enter an email address first");

    let err = h
        .usecase
        .request_code(SessionId::new(), "asha@")
        .await
        .unwrap_err();
    let IntakeServiceError::Validation(fields) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(fields["email"], "Enter a valid email address");
    assert!(h.notifier.sent().is_empty());
}

#[tokio::test]
async fn should_reject_invalid_form_without_touching_the_code() {
    let h = harness(staff(), RecordingNotifier::email_only());
    let session = SessionId::new();
    let code = request_code(&h, session).await;
    let mut input = form(EMAIL, "John Carter", &code);
    input.phone = "12345".to_owned();

    let err = h.usecase.submit(session, input).await.unwrap_err();

    let IntakeServiceError::Validation(fields) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert!(fields.contains_key("phone"));
    assert_eq!(h.sessions.challenge(session).unwrap().code, code);
    assert_eq!(h.notifier.sent().len(), 1);
}

#[tokio::test]
async fn should_resume_open_visit_instead_of_starting_another() {
    let h = harness(staff(), RecordingNotifier::email_only());
    let session = SessionId::new();
    let code = request_code(&h, session).await;
    let IntakeOutcome::Completed(visit) = h
        .usecase
        .submit(session, form(EMAIL, "John Carter", &code))
        .await
        .unwrap()
    else {
        panic!("expected completed intake");
    };

    let again = h
        .usecase
        .submit(session, form(EMAIL, "Maria Lopez", "000000"))
        .await
        .unwrap();
    assert!(matches!(again, IntakeOutcome::Resumed(ref v) if v.id == visit.id));

    let code_request = h.usecase.request_code(session, EMAIL).await.unwrap();
    assert!(matches!(code_request, CodeRequestOutcome::Resumed(ref v) if v.id == visit.id));

    assert_eq!(h.visits.visits.lock().unwrap().len(), 1);
    assert_eq!(h.notifier.sent().len(), 2);
}

#[tokio::test]
async fn should_complete_without_stamp_when_alert_is_not_dispatched() {
    let mut h = harness(staff(), RecordingNotifier::email_only());
    h.usecase.alert_channels = vec![Channel::Sms];
    let session = SessionId::new();
    let code = request_code(&h, session).await;

    let outcome = h
        .usecase
        .submit(session, form(EMAIL, "John Carter", &code))
        .await
        .unwrap();

    let IntakeOutcome::Completed(visit) = outcome else {
        panic!("expected completed intake");
    };
    assert!(visit.sms_sent_at.is_none());
    let alert = &h.notifier.sent()[1];
    assert_eq!(alert.channel, Channel::Sms);
    assert_eq!(alert.recipient, "+919812345678");
}

#[tokio::test]
async fn should_list_active_hosts_on_start() {
    let h = harness(staff(), RecordingNotifier::email_only());

    let start = h.usecase.start(SessionId::new()).await.unwrap();

    assert!(start.active_visit.is_none());
    let names: Vec<_> = start.hosts.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["John Carter", "Maria Lopez", "Priya Nair"]);
}

#[tokio::test]
async fn should_keep_one_open_visit_when_session_link_fails() {
    let visits = MockVisitRepo::empty();
    let sessions = FlakySessionStore::new();
    let usecase = flaky_intake(staff(), visits.clone(), sessions.clone());
    let session = SessionId::new();
    usecase.request_code(session, EMAIL).await.unwrap();
    let code = sessions.inner.challenge(session).unwrap().code;
    sessions.fail_next_set(ACTIVE_VISIT_KEY);

    let err = usecase
        .submit(session, form(EMAIL, "John Carter", &code))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "INTERNAL");
    assert!(visits.visits.lock().unwrap().is_empty());

    // Same code again: nothing was stored and the challenge survived.
    let retry = usecase
        .submit(session, form(EMAIL, "John Carter", &code))
        .await
        .unwrap();
    let IntakeOutcome::Completed(visit) = retry else {
        panic!("expected completed intake, got {retry:?}");
    };

    let again = usecase
        .submit(session, form(EMAIL, "John Carter", "000000"))
        .await
        .unwrap();
    assert!(matches!(again, IntakeOutcome::Resumed(ref v) if v.id == visit.id));

    let stored = visits.visits.lock().unwrap().clone();
    assert_eq!(stored.len(), 1);
    assert!(stored.iter().all(|v| v.id == visit.id && v.is_open()));
}

#[tokio::test]
async fn should_complete_intake_when_code_cannot_be_cleared() {
    let visits = MockVisitRepo::empty();
    let sessions = FlakySessionStore::new();
    sessions.fail_clear(OTC_SESSION_KEY);
    let usecase = flaky_intake(staff(), visits.clone(), sessions.clone());
    let session = SessionId::new();
    usecase.request_code(session, EMAIL).await.unwrap();
    let code = sessions.inner.challenge(session).unwrap().code;

    let outcome = usecase
        .submit(session, form(EMAIL, "John Carter", &code))
        .await
        .unwrap();

    let IntakeOutcome::Completed(visit) = outcome else {
        panic!("expected completed intake, got {outcome:?}");
    };
    assert_eq!(
        sessions.inner.raw(session, ACTIVE_VISIT_KEY),
        Some(serde_json::to_value(visit.id).unwrap())
    );
    assert_eq!(visits.visits.lock().unwrap().len(), 1);
}
