//! Visit status vocabulary and duration rendering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a visit.
///
/// Wire format: lowercase name. `Pending` is part of the stored vocabulary but no
/// code path produces it; visits are created directly as `Ongoing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitStatus {
    Pending,
    Ongoing,
    Ended,
}

impl VisitStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ongoing => "ongoing",
            Self::Ended => "ended",
        }
    }
}

impl fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown visit status: {0}")]
pub struct UnknownVisitStatus(pub String);

impl FromStr for VisitStatus {
    type Err = UnknownVisitStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "ongoing" => Ok(Self::Ongoing),
            "ended" => Ok(Self::Ended),
            other => Err(UnknownVisitStatus(other.to_owned())),
        }
    }
}

/// Text shown for a visit that has not ended yet.
pub const ONGOING_LABEL: &str = "Ongoing";

/// Render a span of seconds as whole hours and minutes, e.g. `"1h 30m"`.
/// Negative spans (clock skew) render as zero.
pub fn format_hours_minutes(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{hours}h {minutes}m")
}
