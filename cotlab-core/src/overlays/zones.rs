//! Zone signal extraction — hysteresis detector over a positioning index.
//!
//! Two independent detectors watch one field: the upper band fires while the
//! value is strictly above `upper_threshold`, the lower band while it is strictly
//! below `lower_threshold`. A detector enters its zone on the first observation
//! beyond the threshold and leaves on the first observation back inside; nulls in
//! between change nothing.
//!
//! In line mode a detector emits a `LineSignal` when it enters. In zone mode it
//! emits a `ZoneSignal` when it leaves, and any zone still open after the last
//! point is flushed with the last point's date as its end.

use crate::domain::{FieldKey, LineSignal, Polarity, Signal, TimeSeriesPoint, ZoneSignal};
use crate::error::{ConfigError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_UPPER_THRESHOLD: f64 = 80.0;
pub const DEFAULT_LOWER_THRESHOLD: f64 = 20.0;
pub const DEFAULT_UPPER_COLOR: &str = "#22c55e";
pub const DEFAULT_LOWER_COLOR: &str = "#ef4444";

/// Detector switches and thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    pub detect_upper: bool,
    pub detect_lower: bool,
    /// Emit closed intervals instead of entry markers.
    pub emit_zones: bool,
    pub upper_threshold: f64,
    pub lower_threshold: f64,
    pub upper_color: String,
    pub lower_color: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            detect_upper: true,
            detect_lower: true,
            emit_zones: true,
            upper_threshold: DEFAULT_UPPER_THRESHOLD,
            lower_threshold: DEFAULT_LOWER_THRESHOLD,
            upper_color: DEFAULT_UPPER_COLOR.to_string(),
            lower_color: DEFAULT_LOWER_COLOR.to_string(),
        }
    }
}

impl ExtractOptions {
    pub fn any_detector(&self) -> bool {
        self.detect_upper || self.detect_lower
    }

    /// Thresholds must be ordered `lower < upper` (NaN fails the comparison).
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.lower_threshold < self.upper_threshold {
            Ok(())
        } else {
            Err(ConfigError::ThresholdOrder {
                lower: self.lower_threshold,
                upper: self.upper_threshold,
            })
        }
    }
}

/// One threshold and how its signals look.
#[derive(Debug, Clone)]
struct Band {
    polarity: Polarity,
    threshold: f64,
    color: String,
    label: String,
}

impl Band {
    fn upper(opts: &ExtractOptions) -> Self {
        Self {
            polarity: Polarity::Upper,
            threshold: opts.upper_threshold,
            color: opts.upper_color.clone(),
            label: format!(">{}", opts.upper_threshold),
        }
    }

    fn lower(opts: &ExtractOptions) -> Self {
        Self {
            polarity: Polarity::Lower,
            threshold: opts.lower_threshold,
            color: opts.lower_color.clone(),
            label: format!("<{}", opts.lower_threshold),
        }
    }

    fn is_beyond(&self, value: f64) -> bool {
        match self.polarity {
            Polarity::Upper => value > self.threshold,
            Polarity::Lower => value < self.threshold,
        }
    }

    fn line(&self, date: NaiveDate) -> Signal {
        Signal::Line(LineSignal {
            date,
            color: self.color.clone(),
            label: self.label.clone(),
            polarity: self.polarity,
        })
    }

    fn zone(&self, start_date: NaiveDate, end_date: NaiveDate) -> Signal {
        Signal::Zone(ZoneSignal {
            start_date,
            end_date,
            color: self.color.clone(),
            polarity: self.polarity,
        })
    }
}

/// Per-band accumulator. `start` is only tracked in zone mode.
#[derive(Debug, Default, Clone, Copy)]
struct BandState {
    in_zone: bool,
    start: Option<NaiveDate>,
}

impl BandState {
    fn step(
        &mut self,
        band: &Band,
        date: NaiveDate,
        value: f64,
        emit_zones: bool,
        out: &mut Vec<Signal>,
    ) {
        if band.is_beyond(value) {
            if !self.in_zone {
                self.in_zone = true;
                if emit_zones {
                    self.start = Some(date);
                } else {
                    out.push(band.line(date));
                }
            }
        } else if self.in_zone {
            if let Some(start) = self.start.take() {
                out.push(band.zone(start, date));
            }
            self.in_zone = false;
        }
    }

    fn flush(&mut self, band: &Band, last_date: NaiveDate, out: &mut Vec<Signal>) {
        if self.in_zone {
            if let Some(start) = self.start.take() {
                out.push(band.zone(start, last_date));
            }
            self.in_zone = false;
        }
    }
}

/// Validated detector configuration, reusable across series.
#[derive(Debug, Clone)]
pub struct ZoneSignalExtractor {
    upper: Option<Band>,
    lower: Option<Band>,
    emit_zones: bool,
}

impl ZoneSignalExtractor {
    pub fn new(opts: &ExtractOptions) -> std::result::Result<Self, ConfigError> {
        opts.validate()?;
        Ok(Self {
            upper: opts.detect_upper.then(|| Band::upper(opts)),
            lower: opts.detect_lower.then(|| Band::lower(opts)),
            emit_zones: opts.emit_zones,
        })
    }

    /// Run both detectors over `series` (sorted ascending by date).
    ///
    /// Output is in the order signals were emitted: zones at their closing point,
    /// forced flushes last (upper before lower).
    pub fn extract(&self, series: &[TimeSeriesPoint], field_key: &FieldKey) -> Vec<Signal> {
        let mut out = Vec::new();
        if self.upper.is_none() && self.lower.is_none() {
            return out;
        }

        let mut upper_state = BandState::default();
        let mut lower_state = BandState::default();

        for point in series {
            let Some(value) = point.value(field_key) else {
                continue;
            };
            if let Some(band) = &self.upper {
                upper_state.step(band, point.date, value, self.emit_zones, &mut out);
            }
            if let Some(band) = &self.lower {
                lower_state.step(band, point.date, value, self.emit_zones, &mut out);
            }
        }

        if let Some(last) = series.last() {
            if let Some(band) = &self.upper {
                upper_state.flush(band, last.date, &mut out);
            }
            if let Some(band) = &self.lower {
                lower_state.flush(band, last.date, &mut out);
            }
        }

        log::debug!(
            "zone extraction on '{field_key}': {} points -> {} signals",
            series.len(),
            out.len()
        );
        out
    }
}

/// Extract threshold signals for `field_key` from a date-sorted series.
///
/// Returns `[]` without looking at the series when both detectors are off.
/// Otherwise thresholds must satisfy `lower < upper`.
pub fn extract(
    series: &[TimeSeriesPoint],
    field_key: &FieldKey,
    opts: &ExtractOptions,
) -> Result<Vec<Signal>> {
    if !opts.any_detector() {
        return Ok(Vec::new());
    }
    let extractor = ZoneSignalExtractor::new(opts)?;
    Ok(extractor.extract(series, field_key))
}
