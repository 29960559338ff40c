//! Date ordering for series handed to the overlay units.
//!
//! Upstream exports are not guaranteed to be in date order, and both units index
//! by position, so callers sort explicitly before processing.

use crate::domain::{CompositePoint, TimeSeriesPoint};
use chrono::NaiveDate;

/// A record anchored to a calendar date.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for TimeSeriesPoint {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for CompositePoint {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Stable ascending sort by date. Points sharing a date keep their input order.
pub fn sort_by_date<T: Dated>(series: &mut [T]) {
    series.sort_by_key(|p| p.date());
}

/// True if dates never decrease along the series.
pub fn is_sorted_by_date<T: Dated>(series: &[T]) -> bool {
    series.windows(2).all(|w| w[0].date() <= w[1].date())
}
