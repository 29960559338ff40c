//! ParameterStore — owns the view state and keeps overlays in sync with it.
//!
//! Every setter that changes an input of an overlay recomputes that overlay in
//! full. Each overlay is keyed by a blake3 hash of its inputs, so a setter that
//! leaves those inputs unchanged does not rerun it.

use crate::data::{
    axis_domain, filter_by_lookback_at, is_sorted_by_date, sort_by_date, LookbackRange,
};
use crate::domain::{
    CompositePoint, CycleComponent, FieldKind, ParticipantCategory, ReportType, Signal,
    TimeSeriesPoint,
};
use crate::error::Result;
use crate::overlays::{extract, reconstruct, select_active, ExtractOptions};
use crate::params::AnalysisParams;
use chrono::NaiveDate;

/// Padding applied to the price/forecast axis.
const PRICE_AXIS_PADDING: f64 = 0.05;

/// blake3 digest of the inputs an overlay was computed from.
///
/// Floats are hashed by their bit pattern, so NaN, +inf and -inf all hash apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputHash([u8; 32]);

impl InputHash {
    fn of(feed: impl FnOnce(&mut blake3::Hasher)) -> Self {
        let mut hasher = blake3::Hasher::new();
        feed(&mut hasher);
        Self(*hasher.finalize().as_bytes())
    }
}

fn hash_f64(hasher: &mut blake3::Hasher, v: f64) {
    hasher.update(&v.to_le_bytes());
}

fn hash_opt(hasher: &mut blake3::Hasher, v: Option<f64>) {
    match v {
        Some(v) => {
            hasher.update(&[1]);
            hash_f64(hasher, v);
        }
        None => {
            hasher.update(&[0]);
        }
    }
}

fn hash_str(hasher: &mut blake3::Hasher, s: &str) {
    hasher.update(&(s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}

fn hash_series(hasher: &mut blake3::Hasher, series: &[TimeSeriesPoint]) {
    hasher.update(&(series.len() as u64).to_le_bytes());
    for p in series {
        hash_str(hasher, &p.date.to_string());
        hasher.update(&(p.values.len() as u64).to_le_bytes());
        for (key, value) in &p.values {
            hash_str(hasher, key);
            hash_opt(hasher, *value);
        }
        hash_opt(hasher, p.open_interest);
        hash_opt(hasher, p.price);
        hash_opt(hasher, p.trend);
    }
}

fn hash_cycles(hasher: &mut blake3::Hasher, cycles: &[CycleComponent]) {
    hasher.update(&(cycles.len() as u64).to_le_bytes());
    for c in cycles {
        hash_str(hasher, &c.id);
        hash_f64(hasher, c.period);
        hash_f64(hasher, c.amplitude);
        hash_f64(hasher, c.phase);
    }
}

fn hash_zone_options(hasher: &mut blake3::Hasher, opts: &ExtractOptions) {
    hasher.update(&[
        u8::from(opts.detect_upper),
        u8::from(opts.detect_lower),
        u8::from(opts.emit_zones),
    ]);
    hash_f64(hasher, opts.upper_threshold);
    hash_f64(hasher, opts.lower_threshold);
    hash_str(hasher, &opts.upper_color);
    hash_str(hasher, &opts.lower_color);
}

/// How many times each overlay has actually been recomputed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecomputeStats {
    pub signals: usize,
    pub composite: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    params: AnalysisParams,
    positioning: Vec<TimeSeriesPoint>,
    prices: Vec<TimeSeriesPoint>,
    cycles: Vec<CycleComponent>,
    signals: Vec<Signal>,
    composite: Vec<CompositePoint>,
    signals_key: Option<InputHash>,
    composite_key: Option<InputHash>,
    stats: RecomputeStats,
}

impl ParameterStore {
    pub fn new(params: AnalysisParams) -> Result<Self> {
        params.validate()?;
        let mut store = Self {
            params,
            ..Self::default()
        };
        store.refresh()?;
        Ok(store)
    }

    // ── Inputs ──────────────────────────────────────────────────────

    /// Replace the positioning series. It is sorted by date before use.
    pub fn set_positioning(&mut self, series: Vec<TimeSeriesPoint>) -> Result<()> {
        self.positioning = sorted(series, "positioning");
        self.refresh_signals()
    }

    /// Replace the price series (with trend). It is sorted by date before use.
    pub fn set_prices(&mut self, series: Vec<TimeSeriesPoint>) -> Result<()> {
        self.prices = sorted(series, "price");
        self.refresh_composite()
    }

    /// Replace the scanned cycle set and select its first `auto_select` cycles.
    ///
    /// A set containing any cycle with an invalid period is rejected whole.
    pub fn set_cycles(&mut self, cycles: Vec<CycleComponent>) -> Result<()> {
        for cycle in &cycles {
            cycle.validate()?;
        }
        let selected = cycles
            .iter()
            .take(self.params.auto_select)
            .map(|c| c.id.clone())
            .collect();
        let mut params = self.params.clone();
        params.selected_cycles = selected;
        log::info!(
            "new cycle set: {} cycles, {} auto-selected",
            cycles.len(),
            params.selected_cycles.len()
        );
        self.cycles = cycles;
        self.params = params;
        self.refresh_composite()
    }

    // ── Parameters ──────────────────────────────────────────────────

    /// Replace all parameters at once.
    pub fn set_params(&mut self, params: AnalysisParams) -> Result<()> {
        params.validate()?;
        self.params = params;
        self.refresh()
    }

    pub fn set_report_type(&mut self, report_type: ReportType) -> Result<()> {
        self.update(|p| *p = p.clone().with_report_type(report_type))
    }

    pub fn set_participant(&mut self, participant: ParticipantCategory) -> Result<()> {
        self.update(|p| p.participant = participant)
    }

    pub fn set_field_kind(&mut self, kind: FieldKind) -> Result<()> {
        self.update(|p| p.field_kind = kind)
    }

    pub fn set_zone_options(&mut self, zones: ExtractOptions) -> Result<()> {
        self.update(|p| p.zones = zones)
    }

    pub fn set_range(&mut self, range: LookbackRange) {
        self.params.range = range;
    }

    pub fn set_show_projection(&mut self, show: bool) {
        self.params.show_projection = show;
    }

    /// Flip the selection of cycle `id`. Returns whether it is now selected.
    pub fn toggle_cycle(&mut self, id: &str) -> Result<bool> {
        let mut now_selected = false;
        self.update(|p| {
            now_selected = if p.selected_cycles.remove(id) {
                false
            } else {
                p.selected_cycles.insert(id.to_string())
            };
        })?;
        Ok(now_selected)
    }

    /// Apply `change` to a copy of the parameters; commit only if it validates.
    fn update(&mut self, change: impl FnOnce(&mut AnalysisParams)) -> Result<()> {
        let mut params = self.params.clone();
        change(&mut params);
        params.validate()?;
        self.params = params;
        self.refresh()
    }

    // ── Recompute ───────────────────────────────────────────────────

    fn refresh(&mut self) -> Result<()> {
        self.refresh_signals()?;
        self.refresh_composite()
    }

    fn refresh_signals(&mut self) -> Result<()> {
        let field_key = self.params.field_key();
        let key = InputHash::of(|h| {
            hash_series(h, &self.positioning);
            hash_str(h, &field_key);
            hash_zone_options(h, &self.params.zones);
        });
        if self.signals_key == Some(key) {
            return Ok(());
        }
        self.signals = extract(&self.positioning, &field_key, &self.params.zones)?;
        self.signals_key = Some(key);
        self.stats.signals += 1;
        Ok(())
    }

    fn refresh_composite(&mut self) -> Result<()> {
        let active = select_active(&self.cycles, &self.params.selected_cycles);
        let key = InputHash::of(|h| {
            hash_series(h, &self.prices);
            hash_cycles(h, &active);
        });
        if self.composite_key == Some(key) {
            return Ok(());
        }
        self.composite = reconstruct(&self.prices, &active)?;
        self.composite_key = Some(key);
        self.stats.composite += 1;
        Ok(())
    }

    // ── Outputs ─────────────────────────────────────────────────────

    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    pub fn cycles(&self) -> &[CycleComponent] {
        &self.cycles
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Composite over the full price series, independent of range and visibility.
    pub fn composite(&self) -> &[CompositePoint] {
        &self.composite
    }

    pub fn stats(&self) -> RecomputeStats {
        self.stats
    }

    /// Signals that reach into the current range window.
    pub fn visible_signals_at(&self, today: NaiveDate) -> Vec<Signal> {
        match self.params.range.cutoff(today) {
            None => self.signals.clone(),
            Some(cutoff) => self
                .signals
                .iter()
                .filter(|s| s.reaches(cutoff))
                .cloned()
                .collect(),
        }
    }

    /// Range-filtered composite; empty while the projection is hidden.
    ///
    /// Filtering happens after reconstruction so the visible window keeps the
    /// phase alignment of the full series.
    pub fn visible_composite_at(&self, today: NaiveDate) -> Vec<CompositePoint> {
        if !self.params.show_projection {
            return Vec::new();
        }
        filter_by_lookback_at(&self.composite, self.params.range, today)
    }

    pub fn visible_positioning_at(&self, today: NaiveDate) -> Vec<TimeSeriesPoint> {
        filter_by_lookback_at(&self.positioning, self.params.range, today)
    }

    pub fn visible_prices_at(&self, today: NaiveDate) -> Vec<TimeSeriesPoint> {
        filter_by_lookback_at(&self.prices, self.params.range, today)
    }

    /// Shared axis for price and forecast in the current window.
    pub fn price_axis_at(&self, today: NaiveDate) -> Option<(f64, f64)> {
        let prices = self.visible_prices_at(today);
        let forecasts = self.visible_composite_at(today);
        axis_domain(
            prices
                .iter()
                .map(|p| p.price)
                .chain(forecasts.iter().map(|c| c.forecast)),
            PRICE_AXIS_PADDING,
        )
    }

    pub fn visible_signals(&self) -> Vec<Signal> {
        self.visible_signals_at(today())
    }

    pub fn visible_composite(&self) -> Vec<CompositePoint> {
        self.visible_composite_at(today())
    }

    pub fn visible_positioning(&self) -> Vec<TimeSeriesPoint> {
        self.visible_positioning_at(today())
    }

    pub fn visible_prices(&self) -> Vec<TimeSeriesPoint> {
        self.visible_prices_at(today())
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn sorted(mut series: Vec<TimeSeriesPoint>, what: &str) -> Vec<TimeSeriesPoint> {
    if !is_sorted_by_date(&series) {
        log::warn!("{what} series arrived out of date order; sorting {} points", series.len());
        sort_by_date(&mut series);
    }
    series
}
