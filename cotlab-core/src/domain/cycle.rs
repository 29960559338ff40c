//! CycleComponent — one externally fitted cosine component.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// A fitted cycle `amplitude * cos(2π t / period + phase)`.
///
/// Components arrive already fitted; nothing in this crate estimates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleComponent {
    pub id: String,
    /// Length of one cycle in time steps (bars).
    pub period: f64,
    pub amplitude: f64,
    /// Phase offset in radians at step 0.
    pub phase: f64,
    pub strength: f64,
    /// Bartels significance score, 0–100.
    pub stability_score: f64,
}

impl CycleComponent {
    pub fn new(id: impl Into<String>, period: f64, amplitude: f64, phase: f64) -> Self {
        Self {
            id: id.into(),
            period,
            amplitude,
            phase,
            strength: 0.0,
            stability_score: 0.0,
        }
    }

    /// Rejects a period that is zero, negative or not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.period.is_finite() && self.period > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::NonPositivePeriod {
                id: self.id.clone(),
                period: self.period,
            })
        }
    }

    pub fn angular_frequency(&self) -> f64 {
        std::f64::consts::TAU / self.period
    }

    /// Stability score on a 0–1 scale, as the dashboard displays it.
    pub fn stability_ratio(&self) -> f64 {
        self.stability_score / 100.0
    }
}
