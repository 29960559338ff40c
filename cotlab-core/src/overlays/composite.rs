//! Composite cycle reconstruction.
//!
//! oscillation(t) = Σ amplitude_c · cos(2π t / period_c + phase_c)
//! forecast(t)    = trend(t) + oscillation(t)
//!
//! `t` is the 0-based position in the series, the origin the cycle fit used.
//! Calendar dates play no part in the phase.

use crate::domain::{CompositePoint, CycleComponent, TimeSeriesPoint};
use crate::error::Result;
use std::collections::BTreeSet;

/// Phase angle of `cycle` at step `t`, reduced to one turn plus the phase offset.
///
/// `t` is reduced modulo the period before scaling, so the argument handed to
/// `cos` stays small even for series tens of thousands of steps long.
fn reduced_angle(cycle: &CycleComponent, t: usize) -> f64 {
    let steps_into_cycle = (t as f64).rem_euclid(cycle.period);
    cycle.angular_frequency() * steps_into_cycle + cycle.phase
}

/// Sum of the active cycles at step `t`.
pub fn oscillation_at(cycles: &[CycleComponent], t: usize) -> f64 {
    cycles
        .iter()
        .map(|c| c.amplitude * reduced_angle(c, t).cos())
        .sum()
}

/// Rebuild the composite overlay for every point of `series` (sorted by date).
///
/// With no active cycles every point carries `None` for both values. Any cycle
/// with a non-positive or non-finite period rejects the whole call.
pub fn reconstruct(
    series: &[TimeSeriesPoint],
    active_cycles: &[CycleComponent],
) -> Result<Vec<CompositePoint>> {
    for cycle in active_cycles {
        cycle.validate()?;
    }

    let points: Vec<CompositePoint> = if active_cycles.is_empty() {
        series
            .iter()
            .enumerate()
            .map(|(index, p)| CompositePoint {
                index,
                date: p.date,
                oscillation: None,
                forecast: None,
            })
            .collect()
    } else {
        series
            .iter()
            .enumerate()
            .map(|(index, p)| {
                let oscillation = oscillation_at(active_cycles, index);
                CompositePoint {
                    index,
                    date: p.date,
                    oscillation: Some(oscillation),
                    forecast: Some(p.trend_or_zero() + oscillation),
                }
            })
            .collect()
    };

    log::debug!(
        "reconstructed {} composite points from {} active cycles",
        points.len(),
        active_cycles.len()
    );
    Ok(points)
}

/// The cycles whose ids are in `selected`, in the order they were supplied.
pub fn select_active(
    cycles: &[CycleComponent],
    selected: &BTreeSet<String>,
) -> Vec<CycleComponent> {
    cycles
        .iter()
        .filter(|c| selected.contains(&c.id))
        .cloned()
        .collect()
}
