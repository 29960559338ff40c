//! CompositePoint — one step of a reconstructed cycle overlay.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reconstructed value at series position `index`.
///
/// `oscillation` is the raw sum of active cycles; `forecast` is that sum lifted
/// onto the price axis by adding the point's trend. Both are `None` when no cycle
/// is active so the renderer can hide the overlay instead of drawing a flat line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositePoint {
    pub index: usize,
    pub date: NaiveDate,
    pub oscillation: Option<f64>,
    pub forecast: Option<f64>,
}

impl CompositePoint {
    pub fn is_active(&self) -> bool {
        self.oscillation.is_some()
    }
}
