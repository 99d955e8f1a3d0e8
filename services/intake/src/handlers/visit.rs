use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::Serialize;

use frontdesk_domain::id::VisitId;
use frontdesk_session::client::resolve_session;

use crate::domain::types::Visit;
use crate::error::IntakeServiceError;
use crate::state::AppState;
use crate::usecase::visit::{EndVisitUseCase, ViewVisitUseCase};

#[derive(Serialize)]
pub struct VisitResponse {
    #[serde(flatten)]
    pub visit: Visit,
    /// `"1h 30m"`, or `"Ongoing"` while the visit is open.
    pub duration: String,
    pub duration_secs: i64,
}

impl From<Visit> for VisitResponse {
    fn from(visit: Visit) -> Self {
        let now = Utc::now();
        Self {
            duration: visit.duration_text(now),
            duration_secs: visit.duration(now).num_seconds().max(0),
            visit,
        }
    }
}

// ── GET /visits/{id} ─────────────────────────────────────────────────────────

pub async fn get_visit(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<VisitId>,
) -> (CookieJar, Result<Json<VisitResponse>, IntakeServiceError>) {
    let (jar, session) = resolve_session(jar, &state.cookie_domain, state.session_ttl_secs);
    let usecase = ViewVisitUseCase {
        sessions: state.session_store(),
        visits: state.visit_repo(),
    };
    let result = usecase
        .execute(session.id, id)
        .await
        .map(|visit| Json(visit.into()));
    (jar, result)
}

// ── POST /visits/{id}/end ────────────────────────────────────────────────────

pub async fn end_visit(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<VisitId>,
) -> (CookieJar, Result<Json<VisitResponse>, IntakeServiceError>) {
    let (jar, session) = resolve_session(jar, &state.cookie_domain, state.session_ttl_secs);
    let usecase = EndVisitUseCase {
        sessions: state.session_store(),
        visits: state.visit_repo(),
    };
    let result = usecase
        .execute(session.id, id)
        .await
        .map(|visit| Json(visit.into()));
    (jar, result)
}
