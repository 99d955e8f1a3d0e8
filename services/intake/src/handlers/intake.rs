use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use frontdesk_domain::id::EmployeeId;
use frontdesk_session::client::resolve_session;

use crate::domain::types::Employee;
use crate::error::IntakeServiceError;
use crate::handlers::visit::VisitResponse;
use crate::infra::db::{DbHostDirectory, DbVisitRepository};
use crate::infra::notify::DispatcherNotifier;
use crate::infra::session::RedisSessionStore;
use crate::state::AppState;
use crate::usecase::intake::{CodeRequestOutcome, IntakeInput, IntakeOutcome, IntakeUseCase};

type IntakeResult<T> = Result<(StatusCode, Json<T>), IntakeServiceError>;

fn intake_usecase(
    state: &AppState,
) -> IntakeUseCase<DbHostDirectory, DbVisitRepository, RedisSessionStore, DispatcherNotifier> {
    IntakeUseCase {
        hosts: state.host_directory(),
        visits: state.visit_repo(),
        sessions: state.session_store(),
        notifier: state.notifier(),
        alert_channels: state.alert_channels.clone(),
        phone_region: state.phone_region.clone(),
    }
}

// ── GET /intake ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HostSuggestion {
    pub id: EmployeeId,
    pub name: String,
    pub department: String,
}

impl From<Employee> for HostSuggestion {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            name: e.name,
            department: e.department,
        }
    }
}

#[derive(Serialize)]
pub struct IntakeStartResponse {
    pub active_visit: Option<VisitResponse>,
    pub hosts: Vec<HostSuggestion>,
}

pub async fn start_intake(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, IntakeResult<IntakeStartResponse>) {
    let (jar, session) = resolve_session(jar, &state.cookie_domain, state.session_ttl_secs);
    let result = intake_usecase(&state)
        .start(session.id)
        .await
        .map(|start| {
            (
                StatusCode::OK,
                Json(IntakeStartResponse {
                    active_visit: start.active_visit.map(VisitResponse::from),
                    hosts: start.hosts.into_iter().map(HostSuggestion::from).collect(),
                }),
            )
        });
    (jar, result)
}

// ── POST /intake/code ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RequestCodeRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum RequestCodeResponse {
    Sent { otc_sent: bool },
    Resumed { state: &'static str, visit: VisitResponse },
}

pub async fn request_code(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RequestCodeRequest>,
) -> (CookieJar, IntakeResult<RequestCodeResponse>) {
    let (jar, session) = resolve_session(jar, &state.cookie_domain, state.session_ttl_secs);
    let result = intake_usecase(&state)
        .request_code(session.id, &body.email)
        .await
        .map(|outcome| match outcome {
            CodeRequestOutcome::Sent => (
                StatusCode::CREATED,
                Json(RequestCodeResponse::Sent { otc_sent: true }),
            ),
            CodeRequestOutcome::Resumed(visit) => (
                StatusCode::OK,
                Json(RequestCodeResponse::Resumed {
                    state: "resumed",
                    visit: visit.into(),
                }),
            ),
        });
    (jar, result)
}

// ── POST /intake ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct SubmitIntakeRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub employee_name: String,
    pub purpose: String,
    pub otc: String,
    pub photo_ref: Option<String>,
    pub govt_id_type: Option<String>,
    pub govt_id_ref: Option<String>,
}

#[derive(Serialize)]
pub struct SubmitIntakeResponse {
    pub state: &'static str,
    pub visit: VisitResponse,
}

pub async fn submit_intake(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SubmitIntakeRequest>,
) -> (CookieJar, IntakeResult<SubmitIntakeResponse>) {
    let (jar, session) = resolve_session(jar, &state.cookie_domain, state.session_ttl_secs);
    let input = IntakeInput {
        full_name: body.full_name,
        email: body.email,
        phone: body.phone,
        address: body.address,
        employee_name: body.employee_name,
        purpose: body.purpose,
        otc: body.otc,
        photo_ref: body.photo_ref,
        govt_id_type: body.govt_id_type,
        govt_id_ref: body.govt_id_ref,
    };
    let result = intake_usecase(&state)
        .submit(session.id, input)
        .await
        .map(|outcome| match outcome {
            IntakeOutcome::Completed(visit) => (
                StatusCode::CREATED,
                Json(SubmitIntakeResponse {
                    state: "completed",
                    visit: visit.into(),
                }),
            ),
            IntakeOutcome::Resumed(visit) => (
                StatusCode::OK,
                Json(SubmitIntakeResponse {
                    state: "resumed",
                    visit: visit.into(),
                }),
            ),
        });
    (jar, result)
}
