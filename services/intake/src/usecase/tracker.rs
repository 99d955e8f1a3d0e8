use frontdesk_domain::id::{SessionId, VisitId};

use crate::domain::repository::{SessionStore, VisitRepository};
use crate::domain::types::Visit;
use crate::error::IntakeServiceError;

/// Session key holding the id of the caller's open visit.
pub const ACTIVE_VISIT_KEY: &str = "active_visit_id";

/// Tracks at most one open visit per client session.
///
/// The link is advisory: it does not lock the visit against other sessions.
pub struct VisitTracker<'a, S, V>
where
    S: SessionStore,
    V: VisitRepository,
{
    pub sessions: &'a S,
    pub visits: &'a V,
}

impl<S, V> VisitTracker<'_, S, V>
where
    S: SessionStore,
    V: VisitRepository,
{
    /// The linked visit if it still exists and is open. A stale link is cleared.
    pub async fn active_visit(&self, session: SessionId) -> Result<Option<Visit>, IntakeServiceError> {
        let Some(value) = self.sessions.get(session, ACTIVE_VISIT_KEY).await? else {
            return Ok(None);
        };

        let visit = match serde_json::from_value::<VisitId>(value) {
            Ok(id) => self.visits.find_by_id(id).await?,
            Err(_) => None,
        };
        match visit {
            Some(visit) if visit.is_open() => Ok(Some(visit)),
            _ => {
                tracing::debug!(%session, "dropping stale active visit link");
                self.unbind(session).await?;
                Ok(None)
            }
        }
    }

    pub async fn bind(&self, session: SessionId, visit: VisitId) -> Result<(), IntakeServiceError> {
        let value =
            serde_json::to_value(visit).map_err(|e| IntakeServiceError::Internal(e.into()))?;
        self.sessions.set(session, ACTIVE_VISIT_KEY, value).await
    }

    pub async fn unbind(&self, session: SessionId) -> Result<(), IntakeServiceError> {
        self.sessions.clear(session, ACTIVE_VISIT_KEY).await
    }

    /// Clear the link only when it points at `visit`.
    pub async fn unbind_if(
        &self,
        session: SessionId,
        visit: VisitId,
    ) -> Result<bool, IntakeServiceError> {
        let linked = self
            .sessions
            .get(session, ACTIVE_VISIT_KEY)
            .await?
            .and_then(|v| serde_json::from_value::<VisitId>(v).ok());
        if linked == Some(visit) {
            self.unbind(session).await?;
            return Ok(true);
        }
        Ok(false)
    }
}
