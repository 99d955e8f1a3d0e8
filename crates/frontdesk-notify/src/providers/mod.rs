//! Concrete vendor adapters.

pub mod brevo;
pub mod fast2sms;
pub mod resend;
pub mod smtp;

use crate::provider::ProviderError;

/// Split `Name <addr>` into its parts; a bare address has no name.
pub(crate) fn split_mailbox(raw: &str) -> (Option<&str>, &str) {
    let raw = raw.trim();
    match (raw.rfind('<'), raw.ends_with('>')) {
        (Some(open), true) => {
            let name = raw[..open].trim().trim_matches('"').trim();
            let addr = raw[open + 1..raw.len() - 1].trim();
            ((!name.is_empty()).then_some(name), addr)
        }
        _ => (None, raw),
    }
}

/// Turn a non-success HTTP response into [`ProviderError::Status`], keeping the body for logs.
pub(crate) async fn error_for_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::Status {
        status: status.as_u16(),
        body,
    })
}
