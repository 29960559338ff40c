//! Domain types for the overlay engine.

pub mod composite;
pub mod cycle;
pub mod participant;
pub mod point;
pub mod signal;

pub use composite::CompositePoint;
pub use cycle::CycleComponent;
pub use participant::{FieldKind, ParticipantCategory, ReportType};
pub use point::TimeSeriesPoint;
pub use signal::{LineSignal, Polarity, Signal, ZoneSignal};

/// Name of a numeric column in a `TimeSeriesPoint` (e.g. `commercial_index`).
pub type FieldKey = str;

/// Build a weekly series carrying `key` for testing.
///
/// `None` entries become explicit nulls. Dates start on 2024-01-02 and step by
/// seven days, matching the cadence of COT reports.
#[cfg(test)]
pub fn make_series(key: &str, values: &[Option<f64>]) -> Vec<TimeSeriesPoint> {
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            TimeSeriesPoint::new(base + chrono::Duration::days(7 * i as i64)).with_value(key, *v)
        })
        .collect()
}
