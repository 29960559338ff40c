//! Lookback window filtering.
//!
//! The cutoff is "today" minus whole calendar months or years. Filtering keeps
//! `date >= cutoff`, preserves input order and never touches the input slice.

use super::align::Dated;
use crate::error::ConfigError;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Range selector shown above every chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LookbackRange {
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "3Y")]
    ThreeYears,
    #[serde(rename = "5Y")]
    FiveYears,
    #[serde(rename = "10Y")]
    TenYears,
    #[default]
    #[serde(rename = "All", alias = "MAX", alias = "all")]
    All,
}

impl LookbackRange {
    /// Window length in calendar months, `None` for `All`.
    pub fn months(&self) -> Option<u32> {
        match self {
            Self::OneMonth => Some(1),
            Self::SixMonths => Some(6),
            Self::OneYear => Some(12),
            Self::ThreeYears => Some(36),
            Self::FiveYears => Some(60),
            Self::TenYears => Some(120),
            Self::All => None,
        }
    }

    /// First date inside the window ending at `today`.
    ///
    /// A day that does not exist in the target month clamps to that month's last
    /// day: 2024-02-29 minus one year is 2023-02-28. The dashboard's JavaScript
    /// `Date` arithmetic rolls over to 2023-03-01 instead, so the two windows can
    /// differ by a day at month ends.
    pub fn cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        self.months().map(|m| {
            today
                .checked_sub_months(Months::new(m))
                .unwrap_or(NaiveDate::MIN)
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMonth => "1M",
            Self::SixMonths => "6M",
            Self::OneYear => "1Y",
            Self::ThreeYears => "3Y",
            Self::FiveYears => "5Y",
            Self::TenYears => "10Y",
            Self::All => "All",
        }
    }
}

impl fmt::Display for LookbackRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LookbackRange {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1M" => Ok(Self::OneMonth),
            "6M" => Ok(Self::SixMonths),
            "1Y" => Ok(Self::OneYear),
            "3Y" => Ok(Self::ThreeYears),
            "5Y" => Ok(Self::FiveYears),
            "10Y" => Ok(Self::TenYears),
            "ALL" | "MAX" => Ok(Self::All),
            _ => Err(ConfigError::UnknownRange(s.to_string())),
        }
    }
}

/// Keep the records of `series` that fall inside `range`, measured from today.
pub fn filter_by_lookback<T: Dated + Clone>(series: &[T], range: LookbackRange) -> Vec<T> {
    filter_by_lookback_at(series, range, chrono::Local::now().date_naive())
}

/// Same as [`filter_by_lookback`] with an explicit reference date.
pub fn filter_by_lookback_at<T: Dated + Clone>(
    series: &[T],
    range: LookbackRange,
    today: NaiveDate,
) -> Vec<T> {
    match range.cutoff(today) {
        None => series.to_vec(),
        Some(cutoff) => series
            .iter()
            .filter(|p| p.date() >= cutoff)
            .cloned()
            .collect(),
    }
}
