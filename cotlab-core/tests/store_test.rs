//! Integration tests for the parameter store.
//!
//! Covers the recompute-on-change contract: which setters rerun which overlay,
//! cycle auto-selection, range views and projection visibility.

use chrono::NaiveDate;
use cotlab_core::data::LookbackRange;
use cotlab_core::domain::{
    CycleComponent, FieldKind, ParticipantCategory, ReportType, TimeSeriesPoint,
};
use cotlab_core::overlays::ExtractOptions;
use cotlab_core::{AnalysisParams, ParameterStore};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Weekly legacy COT series, oldest point in 2020, given out of order.
fn positioning() -> Vec<TimeSeriesPoint> {
    let values = [
        (d(2024, 1, 9), 85.0, 10.0),
        (d(2020, 1, 7), 50.0, 50.0),
        (d(2024, 1, 2), 60.0, 15.0),
        (d(2024, 1, 16), 70.0, 30.0),
        (d(2020, 1, 14), 90.0, 50.0),
        (d(2020, 1, 21), 40.0, 50.0),
    ];
    values
        .iter()
        .map(|&(date, commercial, large_spec)| {
            TimeSeriesPoint::new(date)
                .with_value("commercial_index", Some(commercial))
                .with_value("large_spec_index", Some(large_spec))
        })
        .collect()
}

fn prices(n: usize) -> Vec<TimeSeriesPoint> {
    let base = d(2023, 1, 2);
    (0..n)
        .map(|i| {
            TimeSeriesPoint::new(base + chrono::Duration::days(i as i64))
                .with_price(100.0 + i as f64 * 0.1)
                .with_trend(100.0 + i as f64 * 0.1)
        })
        .collect()
}

fn cycles(n: usize) -> Vec<CycleComponent> {
    (0..n)
        .map(|i| CycleComponent::new(format!("{i}"), 10.0 + i as f64, 1.0, 0.0))
        .collect()
}

#[test]
fn positioning_is_sorted_before_extraction() {
    let mut store = ParameterStore::new(AnalysisParams::default()).unwrap();
    store.set_positioning(positioning()).unwrap();
    let spans: Vec<(NaiveDate, NaiveDate)> =
        store.signals().iter().map(|s| (s.start(), s.end())).collect();
    assert_eq!(
        spans,
        vec![(d(2020, 1, 14), d(2020, 1, 21)), (d(2024, 1, 9), d(2024, 1, 16))]
    );
}

#[test]
fn participant_change_reruns_extraction_only() {
    let mut store = ParameterStore::new(AnalysisParams::default()).unwrap();
    store.set_positioning(positioning()).unwrap();
    let before = store.stats();

    store.set_participant(ParticipantCategory::LargeSpec).unwrap();
    let after = store.stats();
    assert_eq!(after.signals, before.signals + 1);
    assert_eq!(after.composite, before.composite);

    // large spec: 15 → 10 lower zone, closed by 30
    assert_eq!(store.signals().len(), 1);
    assert_eq!(store.signals()[0].start(), d(2024, 1, 2));
    assert_eq!(store.signals()[0].end(), d(2024, 1, 16));
}

#[test]
fn participant_from_other_report_is_rejected() {
    let mut store = ParameterStore::new(AnalysisParams::default()).unwrap();
    assert!(store
        .set_participant(ParticipantCategory::SwapDealer)
        .unwrap_err()
        .is_invalid_configuration());
    assert_eq!(store.params().participant, ParticipantCategory::Commercial);
}

#[test]
fn switching_report_type_moves_to_its_first_category() {
    let mut store = ParameterStore::new(AnalysisParams::default()).unwrap();
    store.set_report_type(ReportType::Disaggregated).unwrap();
    assert_eq!(store.params().participant, ParticipantCategory::ProducerMerchant);
    store.set_field_kind(FieldKind::Net).unwrap();
    assert_eq!(store.params().field_key(), "pm_net");
}

#[test]
fn new_cycle_set_auto_selects_first_five() {
    let mut store = ParameterStore::new(AnalysisParams::default()).unwrap();
    store.set_prices(prices(30)).unwrap();
    store.set_cycles(cycles(8)).unwrap();
    let selected: Vec<&str> = store
        .params()
        .selected_cycles
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(selected, vec!["0", "1", "2", "3", "4"]);
    assert!(store.composite().iter().all(|p| p.oscillation.is_some()));
}

#[test]
fn deselecting_all_cycles_nulls_the_overlay() {
    let mut store = ParameterStore::new(AnalysisParams::default()).unwrap();
    store.set_prices(prices(10)).unwrap();
    store.set_cycles(cycles(2)).unwrap();
    store.toggle_cycle("0").unwrap();
    store.toggle_cycle("1").unwrap();
    assert!(store.composite().iter().all(|p| p.oscillation.is_none()));
    assert_eq!(store.composite().len(), 10);
}

#[test]
fn cycle_set_with_bad_period_is_rejected_whole() {
    let mut store = ParameterStore::new(AnalysisParams::default()).unwrap();
    store.set_cycles(cycles(2)).unwrap();
    let mut bad = cycles(3);
    bad[2].period = 0.0;
    assert!(store.set_cycles(bad).is_err());
    assert_eq!(store.cycles().len(), 2);
}

#[test]
fn zone_options_change_reruns_extraction() {
    let mut store = ParameterStore::new(AnalysisParams::default()).unwrap();
    store.set_positioning(positioning()).unwrap();
    store
        .set_zone_options(ExtractOptions {
            emit_zones: false,
            ..ExtractOptions::default()
        })
        .unwrap();
    assert!(store.signals().iter().all(|s| s.as_line().is_some()));
    assert_eq!(store.signals().len(), 2);
}

#[test]
fn range_views_filter_from_reference_date() {
    let mut store = ParameterStore::new(AnalysisParams::default()).unwrap();
    store.set_positioning(positioning()).unwrap();
    store.set_range(LookbackRange::OneYear);
    let today = d(2024, 6, 1);
    assert_eq!(store.visible_positioning_at(today).len(), 3);
    let visible = store.visible_signals_at(today);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].start(), d(2024, 1, 9));
}

#[test]
fn hidden_projection_yields_no_visible_composite() {
    let mut store = ParameterStore::new(AnalysisParams::default()).unwrap();
    store.set_prices(prices(20)).unwrap();
    store.set_cycles(cycles(1)).unwrap();
    let today = d(2023, 1, 21);
    assert_eq!(store.visible_composite_at(today).len(), 20);
    store.set_show_projection(false);
    assert!(store.visible_composite_at(today).is_empty());
    assert_eq!(store.composite().len(), 20);
}

#[test]
fn price_axis_covers_price_and_forecast() {
    let mut store = ParameterStore::new(AnalysisParams::default()).unwrap();
    store.set_prices(prices(20)).unwrap();
    store
        .set_cycles(vec![CycleComponent::new("big", 10.0, 50.0, 0.0)])
        .unwrap();
    let (lo, hi) = store.price_axis_at(d(2023, 1, 21)).unwrap();
    assert!(lo < 100.0 - 40.0);
    assert!(hi > 100.0 + 40.0);
}

#[test]
fn params_round_trip_through_store() {
    let params = AnalysisParams::from_toml_str(
        r#"
        report_type = "tff"
        participant = "asset_manager"
        range = "3Y"
        selected_cycles = ["2"]
        "#,
    )
    .unwrap();
    let mut store = ParameterStore::new(params.clone()).unwrap();
    assert_eq!(store.params(), &params);
    store.set_params(AnalysisParams::default()).unwrap();
    assert_eq!(store.params().participant, ParticipantCategory::Commercial);
}
