use chrono::{DateTime, Utc};

use frontdesk_domain::id::{SessionId, VisitId};
use frontdesk_domain::visit::VisitStatus;

use crate::domain::repository::{SessionStore, VisitRepository};
use crate::domain::types::{Employee, Visit, Visitor};
use crate::error::IntakeServiceError;
use crate::usecase::tracker::VisitTracker;

/// Creates, closes and annotates visit records.
pub struct VisitLifecycle<'a, V: VisitRepository> {
    pub visits: &'a V,
}

impl<V: VisitRepository> VisitLifecycle<'_, V> {
    /// An ongoing visit of `visitor` to `employee`, not yet stored.
    pub fn draft(visitor: &Visitor, employee: &Employee, purpose: &str) -> Visit {
        Visit {
            id: VisitId::new(),
            visitor_id: visitor.id,
            employee_id: employee.id,
            purpose: purpose.to_owned(),
            started_at: Utc::now(),
            ended_at: None,
            status: VisitStatus::Ongoing,
            sms_sent_at: None,
            notes: String::new(),
        }
    }

    /// Store `visitor` together with a drafted `visit`.
    pub async fn persist(&self, visitor: &Visitor, visit: &Visit) -> Result<(), IntakeServiceError> {
        self.visits.create_with_visitor(visitor, visit).await?;
        tracing::info!(visit_id = %visit.id, employee_id = %visit.employee_id, "visit opened");
        Ok(())
    }

    /// Persist `visitor` with a new ongoing visit to `employee`.
    pub async fn open(
        &self,
        visitor: &Visitor,
        employee: &Employee,
        purpose: &str,
    ) -> Result<Visit, IntakeServiceError> {
        let visit = Self::draft(visitor, employee, purpose);
        self.persist(visitor, &visit).await?;
        Ok(visit)
    }

    /// End the visit. Closing an ended visit changes nothing.
    pub async fn close(&self, id: VisitId) -> Result<Visit, IntakeServiceError> {
        let visit = self
            .visits
            .find_by_id(id)
            .await?
            .ok_or(IntakeServiceError::VisitNotFound)?;
        if !visit.is_open() {
            return Ok(visit);
        }

        if self.visits.close(id, Utc::now()).await? {
            tracing::info!(visit_id = %id, "visit ended");
        }
        // Re-read so a concurrent close reports the winner's timestamp.
        self.visits
            .find_by_id(id)
            .await?
            .ok_or(IntakeServiceError::VisitNotFound)
    }

    /// Stamp `sms_sent_at` when the arrival notification was handed off.
    pub async fn record_notification_result(
        &self,
        visit: &mut Visit,
        dispatched: bool,
    ) -> Result<(), IntakeServiceError> {
        if !dispatched {
            return Ok(());
        }
        let now: DateTime<Utc> = Utc::now();
        self.visits.mark_notified(visit.id, now).await?;
        visit.sms_sent_at = Some(now);
        Ok(())
    }
}

/// View a visit from a client session.
pub struct ViewVisitUseCase<S, V>
where
    S: SessionStore,
    V: VisitRepository,
{
    pub sessions: S,
    pub visits: V,
}

impl<S, V> ViewVisitUseCase<S, V>
where
    S: SessionStore,
    V: VisitRepository,
{
    /// Returns the visit and re-links it to the session while it is open.
    pub async fn execute(&self, session: SessionId, id: VisitId) -> Result<Visit, IntakeServiceError> {
        let visit = self
            .visits
            .find_by_id(id)
            .await?
            .ok_or(IntakeServiceError::VisitNotFound)?;
        if visit.is_open() {
            let tracker = VisitTracker {
                sessions: &self.sessions,
                visits: &self.visits,
            };
            tracker.bind(session, visit.id).await?;
        }
        Ok(visit)
    }
}

/// End a visit from a client session.
pub struct EndVisitUseCase<S, V>
where
    S: SessionStore,
    V: VisitRepository,
{
    pub sessions: S,
    pub visits: V,
}

impl<S, V> EndVisitUseCase<S, V>
where
    S: SessionStore,
    V: VisitRepository,
{
    /// Close the visit and drop the session link if it points at it.
    pub async fn execute(&self, session: SessionId, id: VisitId) -> Result<Visit, IntakeServiceError> {
        let visit = VisitLifecycle {
            visits: &self.visits,
        }
        .close(id)
        .await?;
        VisitTracker {
            sessions: &self.sessions,
            visits: &self.visits,
        }
        .unbind_if(session, id)
        .await?;
        Ok(visit)
    }
}
