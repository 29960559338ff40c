//! Data boundary and shared series helpers.
//!
//! - `records`: normalize service exports into domain types
//! - `align`: date ordering
//! - `range`: lookback window filtering
//! - `scale`: chart axis domains

pub mod align;
pub mod range;
pub mod records;
pub mod scale;

pub use align::{is_sorted_by_date, sort_by_date, Dated};
pub use range::{filter_by_lookback, filter_by_lookback_at, LookbackRange};
pub use records::{
    load_cycles_json, load_series_json, parse_calendar_date, RawCycleRecord, RawSeriesRecord,
};
pub use scale::axis_domain;
