//! Chart signals produced by zone extraction.
//!
//! Field names (`date`, `startDate`, `endDate`, `color`, `label`) are the contract
//! the renderer reads, so the serialized shape must stay stable.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which threshold a signal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Upper,
    Lower,
}

/// Instantaneous marker at the date a threshold was crossed into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSignal {
    pub date: NaiveDate,
    pub color: String,
    pub label: String,
    pub polarity: Polarity,
}

/// Closed interval during which the index stayed beyond a threshold.
///
/// `end_date` is the date of the first observation back inside the band, or the
/// last date of the series when the zone was still open at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSignal {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub color: String,
    pub polarity: Polarity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Signal {
    Line(LineSignal),
    Zone(ZoneSignal),
}

impl Signal {
    pub fn polarity(&self) -> Polarity {
        match self {
            Self::Line(l) => l.polarity,
            Self::Zone(z) => z.polarity,
        }
    }

    /// First date covered by the signal.
    pub fn start(&self) -> NaiveDate {
        match self {
            Self::Line(l) => l.date,
            Self::Zone(z) => z.start_date,
        }
    }

    /// Last date covered by the signal (equal to `start` for a line).
    pub fn end(&self) -> NaiveDate {
        match self {
            Self::Line(l) => l.date,
            Self::Zone(z) => z.end_date,
        }
    }

    pub fn as_zone(&self) -> Option<&ZoneSignal> {
        match self {
            Self::Zone(z) => Some(z),
            Self::Line(_) => None,
        }
    }

    pub fn as_line(&self) -> Option<&LineSignal> {
        match self {
            Self::Line(l) => Some(l),
            Self::Zone(_) => None,
        }
    }

    /// Whether any part of the signal falls on or after `cutoff`.
    pub fn reaches(&self, cutoff: NaiveDate) -> bool {
        self.end() >= cutoff
    }
}
