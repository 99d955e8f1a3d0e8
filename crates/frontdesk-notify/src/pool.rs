//! Bounded background delivery.
//!
//! Jobs go into a bounded queue drained by one pump task; each job runs on its
//! own task once a concurrency permit is free. Submitting never waits: a full
//! queue is reported back to the caller instead.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};

use frontdesk_domain::channel::Channel;

use crate::provider::{Provider, SEND_TIMEOUT};

#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum deliveries running at once.
    pub max_in_flight: usize,
    /// Maximum deliveries waiting for a permit.
    pub queue_capacity: usize,
    /// Upper bound on a single delivery, on top of the provider's own timeout.
    pub send_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_in_flight: 8,
            queue_capacity: 256,
            send_timeout: SEND_TIMEOUT,
        }
    }
}

pub struct DeliveryJob {
    pub provider: Arc<dyn Provider>,
    pub channel: Channel,
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("delivery queue is full")]
    Full,
    #[error("delivery pool has shut down")]
    Closed,
}

#[derive(Clone)]
pub struct DeliveryPool {
    tx: mpsc::Sender<DeliveryJob>,
}

impl DeliveryPool {
    /// Start the pump task. Must be called from within a Tokio runtime.
    pub fn start(config: PoolConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let permits = Arc::new(Semaphore::new(config.max_in_flight.max(1)));
        tokio::spawn(pump(rx, permits, config.send_timeout));
        Self { tx }
    }

    /// Enqueue without waiting.
    pub fn submit(&self, job: DeliveryJob) -> Result<(), SubmitError> {
        self.tx.try_send(job).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SubmitError::Full,
            mpsc::error::TrySendError::Closed(_) => SubmitError::Closed,
        })
    }
}

async fn pump(mut rx: mpsc::Receiver<DeliveryJob>, permits: Arc<Semaphore>, limit: Duration) {
    while let Some(job) = rx.recv().await {
        let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
            break;
        };
        tokio::spawn(async move {
            deliver(job, limit).await;
            drop(permit);
        });
    }
    tracing::debug!("delivery pump stopped");
}

/// Run one job. Failures are logged and dropped; there is no retry.
pub(crate) async fn deliver(job: DeliveryJob, limit: Duration) {
    let provider = job.provider.name();
    let outcome = tokio::time::timeout(
        limit,
        job.provider.send(&job.recipient, &job.subject, &job.body),
    )
    .await;

    match outcome {
        Ok(Ok(message_id)) => {
            tracing::info!(provider, channel = %job.channel, %message_id, "notification delivered");
        }
        Ok(Err(error)) => {
            tracing::warn!(provider, channel = %job.channel, %error, "notification delivery failed");
        }
        Err(_) => {
            tracing::warn!(provider, channel = %job.channel, timeout = ?limit, "notification delivery timed out");
        }
    }
}
