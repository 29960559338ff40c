//! TimeSeriesPoint — one reporting period of positioning or price data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One observation date with its named numeric fields.
///
/// Positioning series are weekly (one point per COT report), price series are daily.
/// A field that is present but `None` and a field that is absent are treated the
/// same way by every consumer: no observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    #[serde(default)]
    pub values: BTreeMap<String, Option<f64>>,
    #[serde(default)]
    pub open_interest: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub trend: Option<f64>,
}

impl TimeSeriesPoint {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            values: BTreeMap::new(),
            open_interest: None,
            price: None,
            trend: None,
        }
    }

    pub fn with_value(mut self, key: impl Into<String>, value: Option<f64>) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_trend(mut self, trend: f64) -> Self {
        self.trend = Some(trend);
        self
    }

    /// Observed value of `key`, or `None` when the field is null, absent or NaN.
    pub fn value(&self, key: &str) -> Option<f64> {
        self.values
            .get(key)
            .copied()
            .flatten()
            .filter(|v| !v.is_nan())
    }

    /// Trend at this point; absent trend counts as zero.
    pub fn trend_or_zero(&self) -> f64 {
        self.trend.filter(|t| t.is_finite()).unwrap_or(0.0)
    }
}
