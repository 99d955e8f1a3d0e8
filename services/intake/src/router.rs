use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;

use frontdesk_core::health::{healthz, readyz};
use frontdesk_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    intake::{request_code, start_intake, submit_intake},
    visit::{end_visit, get_visit},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Intake workflow
        .route("/intake", get(start_intake).post(submit_intake))
        .route("/intake/code", post(request_code))
        // Visits
        .route("/visits/{id}", get(get_visit))
        .route("/visits/{id}/end", post(end_visit))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(trace_layer())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
