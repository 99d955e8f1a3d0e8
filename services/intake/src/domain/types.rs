use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use frontdesk_domain::id::{EmployeeId, VisitId, VisitorId};
use frontdesk_domain::visit::{ONGOING_LABEL, VisitStatus, format_hours_minutes};
use frontdesk_domain::visitor::GovtIdType;

/// Number of digits in a one-time code.
pub const OTC_LEN: usize = 6;

/// One-time code time-to-live in seconds.
pub const OTC_TTL_SECS: i64 = 300;

/// Purpose used in the host alert when the visitor left it blank.
pub const DEFAULT_PURPOSE: &str = "visit";

/// An employee who can host visits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub department: String,
    pub phone: String,
    pub email: String,
    pub active: bool,
}

/// Visitor identity captured at intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Visitor {
    pub id: VisitorId,
    pub full_name: String,
    pub email: String,
    /// Canonical `+<digits>` form.
    pub phone: String,
    pub address: String,
    pub photo_ref: Option<String>,
    pub govt_id_type: Option<GovtIdType>,
    pub govt_id_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Visit {
    pub id: VisitId,
    pub visitor_id: VisitorId,
    pub employee_id: EmployeeId,
    pub purpose: String,
    #[serde(serialize_with = "frontdesk_core::serde::to_rfc3339_ms")]
    pub started_at: DateTime<Utc>,
    #[serde(serialize_with = "frontdesk_core::serde::to_rfc3339_ms_opt")]
    pub ended_at: Option<DateTime<Utc>>,
    pub status: VisitStatus,
    #[serde(serialize_with = "frontdesk_core::serde::to_rfc3339_ms_opt")]
    pub sms_sent_at: Option<DateTime<Utc>>,
    pub notes: String,
}

impl Visit {
    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }

    /// `ended_at - started_at` once ended, otherwise `now - started_at`.
    pub fn duration(&self, now: DateTime<Utc>) -> Duration {
        self.ended_at.unwrap_or(now) - self.started_at
    }

    /// `"1h 30m"` for an ended visit, `"Ongoing"` otherwise.
    pub fn duration_text(&self, now: DateTime<Utc>) -> String {
        if self.is_open() {
            ONGOING_LABEL.to_owned()
        } else {
            format_hours_minutes(self.duration(now).num_seconds())
        }
    }
}

/// Session-scoped one-time code challenge. At most one per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtcChallenge {
    pub email: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl OtcChallenge {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Result of checking a submitted code against the session challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtcVerdict {
    Valid,
    Mismatch,
    Expired,
    NoChallenge,
}
