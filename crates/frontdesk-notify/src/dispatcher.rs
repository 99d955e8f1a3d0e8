use frontdesk_domain::channel::Channel;
use frontdesk_domain::phone;

use crate::config::NotifyConfig;
use crate::pool::{DeliveryJob, DeliveryPool, PoolConfig};
use crate::provider::{ProviderError, SEND_TIMEOUT};
use crate::registry::ProviderRegistry;

/// Coarse result of [`Dispatcher::send`]. `Accepted` means handed to the pool,
/// not delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Accepted,
    Rejected(RejectReason),
}

impl DispatchOutcome {
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No provider is configured for the channel.
    Unconfigured,
    /// Empty email address or a phone number that does not normalize.
    InvalidRecipient,
    /// The delivery pool is saturated (or gone).
    QueueFull,
}

/// Picks the provider for a channel, validates the recipient and hands the
/// network call to the delivery pool.
#[derive(Clone)]
pub struct Dispatcher {
    registry: ProviderRegistry,
    pool: DeliveryPool,
    default_region: String,
}

impl Dispatcher {
    pub fn new(registry: ProviderRegistry, pool: DeliveryPool, default_region: String) -> Self {
        Self {
            registry,
            pool,
            default_region,
        }
    }

    /// Build the registry and start the pool from settings. Needs a Tokio runtime.
    pub fn from_config(config: &NotifyConfig) -> Result<Self, ProviderError> {
        let registry = ProviderRegistry::from_config(config)?;
        let pool = DeliveryPool::start(PoolConfig {
            max_in_flight: config.notify_max_in_flight,
            queue_capacity: config.notify_queue_capacity,
            send_timeout: SEND_TIMEOUT,
        });
        Ok(Self::new(
            registry,
            pool,
            config.phone_default_region.clone(),
        ))
    }

    /// Queue a message without waiting for the provider.
    pub fn send(
        &self,
        channel: Channel,
        recipient_raw: &str,
        subject: &str,
        body: &str,
    ) -> DispatchOutcome {
        let Some(provider) = self.registry.for_channel(channel) else {
            tracing::debug!(%channel, "no provider configured");
            return DispatchOutcome::Rejected(RejectReason::Unconfigured);
        };
        let Some(recipient) = self.recipient(channel, recipient_raw) else {
            tracing::debug!(%channel, "recipient failed validation");
            return DispatchOutcome::Rejected(RejectReason::InvalidRecipient);
        };

        let job = DeliveryJob {
            provider: provider.clone(),
            channel,
            recipient,
            subject: subject.to_owned(),
            body: body.to_owned(),
        };
        match self.pool.submit(job) {
            Ok(()) => DispatchOutcome::Accepted,
            Err(e) => {
                tracing::warn!(%channel, error = %e, "notification dropped");
                DispatchOutcome::Rejected(RejectReason::QueueFull)
            }
        }
    }

    /// Deliver in the foreground and return the provider message id.
    /// For operator tooling; request paths use [`Dispatcher::send`].
    pub async fn send_now(
        &self,
        channel: Channel,
        recipient_raw: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, SendNowError> {
        let provider = self
            .registry
            .for_channel(channel)
            .ok_or(SendNowError::Unconfigured(channel))?;
        let recipient = self
            .recipient(channel, recipient_raw)
            .ok_or_else(|| SendNowError::InvalidRecipient(recipient_raw.to_owned()))?;
        match tokio::time::timeout(SEND_TIMEOUT, provider.send(&recipient, subject, body)).await {
            Ok(result) => result.map_err(SendNowError::Provider),
            Err(_) => Err(SendNowError::Provider(ProviderError::Timeout(SEND_TIMEOUT))),
        }
    }

    fn recipient(&self, channel: Channel, raw: &str) -> Option<String> {
        if channel.is_phone() {
            phone::normalize(raw, &self.default_region).ok()
        } else {
            let email = raw.trim();
            (!email.is_empty()).then(|| email.to_owned())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SendNowError {
    #[error("no provider configured for {0}")]
    Unconfigured(Channel),
    #[error("invalid recipient: {0}")]
    InvalidRecipient(String),
    #[error(transparent)]
    Provider(ProviderError),
}
