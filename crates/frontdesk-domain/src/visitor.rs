//! Visitor identity document types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of government ID a visitor presented. Wire format: lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GovtIdType {
    Aadhaar,
    Pan,
    Passport,
    Other,
}

impl GovtIdType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aadhaar => "aadhaar",
            Self::Pan => "pan",
            Self::Passport => "passport",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for GovtIdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GovtIdType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aadhaar" => Ok(Self::Aadhaar),
            "pan" => Ok(Self::Pan),
            "passport" => Ok(Self::Passport),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown govt id type: {other}")),
        }
    }
}
