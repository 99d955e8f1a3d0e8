use chrono::{Duration, Utc};

use frontdesk_domain::id::{SessionId, VisitId};
use frontdesk_domain::visit::VisitStatus;
use frontdesk_intake::error::IntakeServiceError;
use frontdesk_intake::usecase::tracker::{ACTIVE_VISIT_KEY, VisitTracker};
use frontdesk_intake::usecase::visit::{EndVisitUseCase, ViewVisitUseCase, VisitLifecycle};

use crate::helpers::{MemorySessionStore, MockVisitRepo, open_visit};

#[tokio::test]
async fn should_close_open_visit() {
    let visit = open_visit(Utc::now() - Duration::minutes(20));
    let visits = MockVisitRepo::with_visits(vec![visit.clone()]);
    let lifecycle = VisitLifecycle { visits: &visits };

    let closed = lifecycle.close(visit.id).await.unwrap();

    assert_eq!(closed.status, VisitStatus::Ended);
    let ended_at = closed.ended_at.expect("ended_at set");
    assert!(ended_at >= closed.started_at);
}

#[tokio::test]
async fn should_keep_first_end_time_when_closed_twice() {
    let visit = open_visit(Utc::now() - Duration::minutes(20));
    let visits = MockVisitRepo::with_visits(vec![visit.clone()]);
    let lifecycle = VisitLifecycle { visits: &visits };

    let first = lifecycle.close(visit.id).await.unwrap();
    let second = lifecycle.close(visit.id).await.unwrap();

    assert_eq!(first.ended_at, second.ended_at);
    assert_eq!(second.status, VisitStatus::Ended);
}

#[tokio::test]
async fn should_report_missing_visit_on_close() {
    let visits = MockVisitRepo::empty();
    let lifecycle = VisitLifecycle { visits: &visits };

    let err = lifecycle.close(VisitId::new()).await.unwrap_err();
    assert!(matches!(err, IntakeServiceError::VisitNotFound));
}

#[tokio::test]
async fn should_render_ended_duration_as_hours_and_minutes() {
    let started = Utc::now() - Duration::hours(3);
    let mut visit = open_visit(started);
    visit.ended_at = Some(started + Duration::minutes(90));

    assert_eq!(visit.duration_text(Utc::now()), "1h 30m");
}

#[tokio::test]
async fn should_stamp_notification_time_only_when_dispatched() {
    let visit = open_visit(Utc::now());
    let visits = MockVisitRepo::with_visits(vec![visit.clone()]);
    let lifecycle = VisitLifecycle { visits: &visits };

    let mut untouched = visit.clone();
    lifecycle
        .record_notification_result(&mut untouched, false)
        .await
        .unwrap();
    assert!(untouched.sms_sent_at.is_none());
    assert!(visits.get(visit.id).unwrap().sms_sent_at.is_none());

    let mut stamped = visit.clone();
    lifecycle
        .record_notification_result(&mut stamped, true)
        .await
        .unwrap();
    assert!(stamped.sms_sent_at.is_some());
    assert_eq!(visits.get(visit.id).unwrap().sms_sent_at, stamped.sms_sent_at);
}

#[tokio::test]
async fn should_relink_open_visit_on_view() {
    let visit = open_visit(Utc::now());
    let visits = MockVisitRepo::with_visits(vec![visit.clone()]);
    let sessions = MemorySessionStore::new();
    let usecase = ViewVisitUseCase {
        sessions: sessions.clone(),
        visits: visits.clone(),
    };
    let session = SessionId::new();

    let viewed = usecase.execute(session, visit.id).await.unwrap();

    assert_eq!(viewed, visit);
    let tracker = VisitTracker {
        sessions: &sessions,
        visits: &visits,
    };
    assert_eq!(tracker.active_visit(session).await.unwrap(), Some(visit));
}

#[tokio::test]
async fn should_not_link_ended_visit_on_view() {
    let mut visit = open_visit(Utc::now() - Duration::hours(1));
    visit.ended_at = Some(Utc::now());
    visit.status = VisitStatus::Ended;
    let visits = MockVisitRepo::with_visits(vec![visit.clone()]);
    let sessions = MemorySessionStore::new();
    let usecase = ViewVisitUseCase {
        sessions: sessions.clone(),
        visits,
    };
    let session = SessionId::new();

    usecase.execute(session, visit.id).await.unwrap();

    assert!(sessions.raw(session, ACTIVE_VISIT_KEY).is_none());
}

#[tokio::test]
async fn should_end_visit_and_clear_matching_link() {
    let visit = open_visit(Utc::now());
    let visits = MockVisitRepo::with_visits(vec![visit.clone()]);
    let sessions = MemorySessionStore::new();
    let session = SessionId::new();
    VisitTracker {
        sessions: &sessions,
        visits: &visits,
    }
    .bind(session, visit.id)
    .await
    .unwrap();
    let usecase = EndVisitUseCase {
        sessions: sessions.clone(),
        visits: visits.clone(),
    };

    let ended = usecase.execute(session, visit.id).await.unwrap();

    assert!(!ended.is_open());
    assert!(sessions.raw(session, ACTIVE_VISIT_KEY).is_none());
}

#[tokio::test]
async fn should_keep_other_link_when_ending_unrelated_visit() {
    let linked = open_visit(Utc::now());
    let other = open_visit(Utc::now());
    let visits = MockVisitRepo::with_visits(vec![linked.clone(), other.clone()]);
    let sessions = MemorySessionStore::new();
    let session = SessionId::new();
    let tracker = VisitTracker {
        sessions: &sessions,
        visits: &visits,
    };
    tracker.bind(session, linked.id).await.unwrap();
    let usecase = EndVisitUseCase {
        sessions: sessions.clone(),
        visits: visits.clone(),
    };

    usecase.execute(session, other.id).await.unwrap();

    assert_eq!(tracker.active_visit(session).await.unwrap(), Some(linked));
}

#[tokio::test]
async fn should_open_ongoing_visit() {
    let host = crate::helpers::employee("John Carter");
    let visitor = frontdesk_intake::domain::types::Visitor {
        id: frontdesk_domain::id::VisitorId::new(),
        full_name: "Asha Rao".to_owned(),
        email: "asha@example.com".to_owned(),
        phone: "+919876543210".to_owned(),
        address: "12 MG Road".to_owned(),
        photo_ref: None,
        govt_id_type: None,
        govt_id_ref: None,
        created_at: Utc::now(),
    };
    let visits = MockVisitRepo::empty();
    let lifecycle = VisitLifecycle { visits: &visits };

    let visit = lifecycle.open(&visitor, &host, "Interview").await.unwrap();

    assert_eq!(visit.status, VisitStatus::Ongoing);
    assert!(visit.is_open());
    assert_eq!(visit.employee_id, host.id);
    assert_eq!(visits.get(visit.id), Some(visit));
}
