use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Per-field validation messages, keyed by request field name.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Intake service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum IntakeServiceError {
    #[error("invalid input")]
    Validation(FieldErrors),
    #[error("no verification code was requested; a new code has been sent")]
    NoChallenge,
    #[error("verification code does not match; a new code has been sent")]
    ChallengeMismatch,
    #[error("verification code has expired; a new code has been sent")]
    ChallengeExpired,
    #[error("could not send the verification code; check the email address and try again")]
    DispatchUnavailable,
    #[error("no active employee matches the host name")]
    HostNotResolved,
    #[error("visit not found")]
    VisitNotFound,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IntakeServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::NoChallenge => "NO_CHALLENGE",
            Self::ChallengeMismatch => "CHALLENGE_MISMATCH",
            Self::ChallengeExpired => "CHALLENGE_EXPIRED",
            Self::DispatchUnavailable => "DISPATCH_UNAVAILABLE",
            Self::HostNotResolved => "HOST_NOT_RESOLVED",
            Self::VisitNotFound => "VISIT_NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Single-field validation error.
    pub fn field(name: &'static str, message: impl Into<String>) -> Self {
        Self::Validation(BTreeMap::from([(name, message.into())]))
    }
}

impl IntoResponse for IntakeServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_)
            | Self::NoChallenge
            | Self::ChallengeMismatch
            | Self::ChallengeExpired
            | Self::HostNotResolved => StatusCode::BAD_REQUEST,
            Self::DispatchUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::VisitNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // 4xx are already visible in the TraceLayer span; only 500s need the chain.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::Validation(fields) = &self {
            body["fields"] = serde_json::json!(fields);
        }
        (status, axum::Json(body)).into_response()
    }
}
