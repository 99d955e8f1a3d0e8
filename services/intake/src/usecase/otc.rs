use chrono::{DateTime, Duration, Utc};
use rand::RngExt;

use frontdesk_domain::channel::Channel;
use frontdesk_domain::id::SessionId;

use crate::domain::repository::{NotificationPort, SessionStore};
use crate::domain::types::{OTC_LEN, OTC_TTL_SECS, OtcChallenge, OtcVerdict};
use crate::error::IntakeServiceError;
use crate::usecase::messages;

/// Session key holding the current [`OtcChallenge`].
pub const OTC_SESSION_KEY: &str = "otc_challenge";

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..OTC_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// A freshly issued challenge and whether its email was accepted for delivery.
#[derive(Debug, Clone)]
pub struct IssuedChallenge {
    pub challenge: OtcChallenge,
    pub dispatched: bool,
}

/// Issues and checks session-scoped one-time codes.
///
/// A code stays valid until it expires or a new one is issued for the same
/// session; checking it does not consume it.
pub struct OtcManager<'a, S, N>
where
    S: SessionStore,
    N: NotificationPort,
{
    pub sessions: &'a S,
    pub notifier: &'a N,
}

impl<S, N> OtcManager<'_, S, N>
where
    S: SessionStore,
    N: NotificationPort,
{
    pub async fn issue(
        &self,
        session: SessionId,
        email: &str,
    ) -> Result<IssuedChallenge, IntakeServiceError> {
        self.issue_at(session, email, Utc::now()).await
    }

    /// Store a new challenge (replacing any previous one) and email the code.
    pub async fn issue_at(
        &self,
        session: SessionId,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedChallenge, IntakeServiceError> {
        let challenge = OtcChallenge {
            email: email.to_owned(),
            code: generate_code(),
            expires_at: now + Duration::seconds(OTC_TTL_SECS),
        };
        let value = serde_json::to_value(&challenge)
            .map_err(|e| IntakeServiceError::Internal(e.into()))?;
        self.sessions.set(session, OTC_SESSION_KEY, value).await?;

        let message = messages::otc_email(&challenge.code);
        let dispatched = self
            .notifier
            .send(Channel::Email, email, &message.subject, &message.body)
            .is_accepted();
        tracing::info!(%session, dispatched, "one-time code issued");

        Ok(IssuedChallenge {
            challenge,
            dispatched,
        })
    }

    pub async fn validate(
        &self,
        session: SessionId,
        email: &str,
        code: &str,
    ) -> Result<OtcVerdict, IntakeServiceError> {
        self.validate_at(session, email, code, Utc::now()).await
    }

    /// Compare `email` and `code` exactly against the stored challenge.
    pub async fn validate_at(
        &self,
        session: SessionId,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<OtcVerdict, IntakeServiceError> {
        let Some(challenge) = self.current(session).await? else {
            return Ok(OtcVerdict::NoChallenge);
        };
        if challenge.email != email || challenge.code != code {
            return Ok(OtcVerdict::Mismatch);
        }
        if challenge.is_expired_at(now) {
            return Ok(OtcVerdict::Expired);
        }
        Ok(OtcVerdict::Valid)
    }

    pub async fn clear(&self, session: SessionId) -> Result<(), IntakeServiceError> {
        self.sessions.clear(session, OTC_SESSION_KEY).await
    }

    /// The stored challenge. An unreadable value counts as absent.
    async fn current(&self, session: SessionId) -> Result<Option<OtcChallenge>, IntakeServiceError> {
        let value = self.sessions.get(session, OTC_SESSION_KEY).await?;
        Ok(value.and_then(|v| serde_json::from_value(v).ok()))
    }
}
