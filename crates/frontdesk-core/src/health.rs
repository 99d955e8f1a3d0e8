use axum::http::StatusCode;

/// Handler for `GET /healthz`. Liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz`. Readiness check.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
