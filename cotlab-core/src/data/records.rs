//! Boundary records as the analytics service returns them.
//!
//! Everything the overlay units consume is normalized here, once: date strings
//! become `NaiveDate`, aliased cycle fields collapse to one canonical field, and
//! non-numeric columns are dropped from the value map.

use crate::domain::{CycleComponent, TimeSeriesPoint};
use crate::error::{OverlayError, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Envelope keys under which the service nests its record arrays.
const SERIES_ENVELOPE_KEYS: &[&str] = &["data", "chart_data", "series"];
const CYCLE_ENVELOPE_KEYS: &[&str] = &["cycles"];

/// One row of a positioning or price export.
///
/// Known columns are named; every other column is captured in `fields` and kept
/// as a point value when it is numeric or null.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSeriesRecord {
    pub date: String,
    #[serde(default)]
    pub open_interest: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    /// Price exports sometimes call the price column `close`.
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default)]
    pub trend: Option<f64>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl TryFrom<RawSeriesRecord> for TimeSeriesPoint {
    type Error = OverlayError;

    fn try_from(raw: RawSeriesRecord) -> Result<Self> {
        let date = parse_calendar_date(&raw.date)?;
        let values = raw
            .fields
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Null => Some((key, None)),
                Value::Number(n) => Some((key, n.as_f64())),
                _ => None,
            })
            .collect();
        Ok(TimeSeriesPoint {
            date,
            values,
            open_interest: raw.open_interest,
            price: raw.price.or(raw.close),
            trend: raw.trend,
        })
    }
}

/// One fitted cycle as the scanner endpoint returns it.
///
/// The upstream schema is inconsistent: amplitude, strength and the Bartels
/// score each appear under two names.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCycleRecord {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub period: Option<f64>,
    #[serde(default)]
    pub amplitude: Option<f64>,
    #[serde(default)]
    pub amp: Option<f64>,
    #[serde(default)]
    pub phase: Option<f64>,
    #[serde(default)]
    pub strength: Option<f64>,
    #[serde(default)]
    pub strg: Option<f64>,
    #[serde(default)]
    pub bartels_score: Option<f64>,
    #[serde(default)]
    pub bartels: Option<f64>,
}

impl TryFrom<RawCycleRecord> for CycleComponent {
    type Error = OverlayError;

    fn try_from(raw: RawCycleRecord) -> Result<Self> {
        let id = match raw.id {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            other => {
                return Err(OverlayError::MalformedRecord(format!(
                    "cycle id must be a string or number, got {other}"
                )))
            }
        };
        let period = raw
            .period
            .ok_or_else(|| OverlayError::MalformedRecord(format!("cycle '{id}' has no period")))?;

        Ok(CycleComponent {
            id,
            period,
            amplitude: raw.amplitude.or(raw.amp).unwrap_or(0.0),
            phase: raw.phase.unwrap_or(0.0),
            strength: raw.strength.or(raw.strg).unwrap_or(0.0),
            stability_score: raw.bartels_score.or(raw.bartels).unwrap_or(0.0),
        })
    }
}

/// Accepts `YYYY-MM-DD` or any ISO datetime starting with one.
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            s.get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
        .ok_or_else(|| OverlayError::MalformedRecord(format!("unparseable date '{s}'")))
}

/// Parse a series export: a bare array, or an object nesting one under
/// `data`, `chart_data` or `series`.
pub fn load_series_json(text: &str) -> Result<Vec<TimeSeriesPoint>> {
    let records: Vec<RawSeriesRecord> =
        serde_json::from_value(unwrap_envelope(text, SERIES_ENVELOPE_KEYS)?)?;
    records.into_iter().map(TimeSeriesPoint::try_from).collect()
}

/// Parse a cycle scan result: a bare array or an object with a `cycles` array.
pub fn load_cycles_json(text: &str) -> Result<Vec<CycleComponent>> {
    let records: Vec<RawCycleRecord> =
        serde_json::from_value(unwrap_envelope(text, CYCLE_ENVELOPE_KEYS)?)?;
    records.into_iter().map(CycleComponent::try_from).collect()
}

fn unwrap_envelope(text: &str, keys: &[&str]) -> Result<Value> {
    match serde_json::from_str::<Value>(text)? {
        array @ Value::Array(_) => Ok(array),
        Value::Object(mut map) => keys
            .iter()
            .find_map(|k| match map.remove(*k) {
                Some(array @ Value::Array(_)) => Some(array),
                _ => None,
            })
            .ok_or_else(|| {
                OverlayError::MalformedRecord(format!(
                    "expected an array or an object with one of {keys:?}"
                ))
            }),
        other => Err(OverlayError::MalformedRecord(format!(
            "expected an array of records, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_record_keeps_numeric_columns() {
        let json = r#"[
            {"date": "2024-01-02", "commercial_index": 84.1, "large_spec_index": null,
             "commercial_net": -12000, "open_interest": 250000, "symbol": "GC=F"}
        ]"#;
        let series = load_series_json(json).unwrap();
        assert_eq!(series.len(), 1);
        let p = &series[0];
        assert_eq!(p.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(p.value("commercial_index"), Some(84.1));
        assert_eq!(p.value("commercial_net"), Some(-12000.0));
        assert_eq!(p.values.get("large_spec_index"), Some(&None));
        assert!(!p.values.contains_key("symbol"));
        assert_eq!(p.open_interest, Some(250000.0));
    }

    #[test]
    fn close_fills_in_for_missing_price() {
        let json = r#"{"chart_data": [
            {"date": "2024-01-02T00:00:00", "close": 101.5, "trend": 100.0},
            {"date": "2024-01-03", "price": 102.0, "close": 99.0}
        ]}"#;
        let series = load_series_json(json).unwrap();
        assert_eq!(series[0].price, Some(101.5));
        assert_eq!(series[0].trend, Some(100.0));
        assert_eq!(series[1].price, Some(102.0));
    }

    #[test]
    fn bad_date_is_malformed() {
        let err = load_series_json(r#"[{"date": "last tuesday"}]"#).unwrap_err();
        assert!(matches!(err, OverlayError::MalformedRecord(_)));
    }

    #[test]
    fn cycle_aliases_normalize() {
        let json = r#"{"cycles": [
            {"id": 1, "period": 64, "amp": 3.5, "phase": 1.2, "strg": 0.4, "bartels": 91},
            {"id": "c2", "period": 21.5, "amplitude": 1.0, "amp": 9.0,
             "strength": 0.2, "bartels_score": 55}
        ]}"#;
        let cycles = load_cycles_json(json).unwrap();
        assert_eq!(cycles[0].id, "1");
        assert_eq!(cycles[0].amplitude, 3.5);
        assert_eq!(cycles[0].strength, 0.4);
        assert_eq!(cycles[0].stability_score, 91.0);
        assert_eq!(cycles[1].id, "c2");
        assert_eq!(cycles[1].amplitude, 1.0);
        assert_eq!(cycles[1].phase, 0.0);
        assert_eq!(cycles[1].stability_score, 55.0);
    }

    #[test]
    fn cycle_without_period_is_malformed() {
        let err = load_cycles_json(r#"[{"id": "x", "amplitude": 1.0}]"#).unwrap_err();
        assert!(matches!(err, OverlayError::MalformedRecord(_)));
    }

    #[test]
    fn cycle_without_id_is_malformed() {
        let err = load_cycles_json(r#"[{"period": 10.0}]"#).unwrap_err();
        assert!(matches!(err, OverlayError::MalformedRecord(_)));
    }

    #[test]
    fn non_array_payload_is_rejected() {
        assert!(load_series_json(r#"{"detail": "not found"}"#).is_err());
        assert!(load_series_json("42").is_err());
    }
}
