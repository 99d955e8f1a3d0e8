use std::time::Duration;

use async_trait::async_trait;

use frontdesk_domain::channel::Channel;

/// Network timeout applied to every provider call.
pub const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Failure reported by a provider adapter. Never surfaces past the delivery pool.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("provider rejected the message: {0}")]
    Rejected(String),
    #[error("malformed provider response: {0}")]
    Malformed(String),
    #[error("invalid recipient: {0}")]
    InvalidRecipient(String),
    #[error("smtp error: {0}")]
    Smtp(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("invalid provider configuration: {0}")]
    Config(String),
}

/// A delivery vendor for one channel.
///
/// `to` is an email address for [`Channel::Email`] and the canonical `+<digits>`
/// number for phone channels; adapters reshape it to their own wire format.
/// On success the vendor's message id (or an acknowledgement token) is returned.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short vendor name used in logs.
    fn name(&self) -> &'static str;

    fn channel(&self) -> Channel;

    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, ProviderError>;
}
