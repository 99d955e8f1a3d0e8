#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use frontdesk_domain::channel::Channel;
use frontdesk_domain::id::{SessionId, VisitId};
use frontdesk_notify::DispatchOutcome;

use crate::domain::types::{Employee, Visit, Visitor};
use crate::error::IntakeServiceError;

/// Read-only view of the employee directory.
///
/// Every lookup returns active employees only, ordered by lowercase name and
/// then id, so "first match" is deterministic.
pub trait HostDirectory: Send + Sync {
    /// Case-insensitive whole-name match.
    async fn find_active_by_name_exact(
        &self,
        name: &str,
    ) -> Result<Vec<Employee>, IntakeServiceError>;

    /// Case-insensitive substring match.
    async fn find_active_by_name_contains(
        &self,
        fragment: &str,
    ) -> Result<Vec<Employee>, IntakeServiceError>;

    async fn list_active(&self) -> Result<Vec<Employee>, IntakeServiceError>;
}

/// Durable visitor and visit records.
pub trait VisitRepository: Send + Sync {
    /// Insert the visitor and its first visit atomically (same transaction).
    async fn create_with_visitor(
        &self,
        visitor: &Visitor,
        visit: &Visit,
    ) -> Result<(), IntakeServiceError>;

    async fn find_by_id(&self, id: VisitId) -> Result<Option<Visit>, IntakeServiceError>;

    /// End the visit if it is still open. Returns `true` if this call ended it.
    async fn close(&self, id: VisitId, at: DateTime<Utc>) -> Result<bool, IntakeServiceError>;

    /// Record that the arrival notification was handed to a provider.
    async fn mark_notified(&self, id: VisitId, at: DateTime<Utc>)
    -> Result<(), IntakeServiceError>;
}

/// Small JSON values scoped to one client session.
pub trait SessionStore: Send + Sync {
    async fn get(
        &self,
        session: SessionId,
        key: &str,
    ) -> Result<Option<serde_json::Value>, IntakeServiceError>;

    async fn set(
        &self,
        session: SessionId,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), IntakeServiceError>;

    async fn clear(&self, session: SessionId, key: &str) -> Result<(), IntakeServiceError>;
}

/// Outbound notifications. Never waits for the provider.
pub trait NotificationPort: Send + Sync {
    fn send(&self, channel: Channel, recipient: &str, subject: &str, body: &str)
    -> DispatchOutcome;
}
