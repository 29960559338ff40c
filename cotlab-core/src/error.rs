//! Error taxonomy for the overlay engine.
//!
//! Configuration errors are raised synchronously and never recovered locally.
//! Empty or all-null input is not an error: every operation degrades to an
//! empty or null-filled result instead.

use thiserror::Error;

/// A rejected parameter combination.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("lower threshold {lower} must be strictly below upper threshold {upper}")]
    ThresholdOrder { lower: f64, upper: f64 },

    #[error("cycle '{id}' has non-positive or non-finite period {period}")]
    NonPositivePeriod { id: String, period: f64 },

    #[error("participant '{participant}' is not part of the {report_type} report")]
    ParticipantMismatch {
        participant: String,
        report_type: String,
    },

    #[error("unknown lookback range '{0}' (expected 1M, 6M, 1Y, 3Y, 5Y, 10Y or All)")]
    UnknownRange(String),

    #[error("unknown report type '{0}' (expected legacy, tff or disaggregated)")]
    UnknownReportType(String),

    #[error("unknown participant category '{0}'")]
    UnknownParticipant(String),
}

/// Errors surfaced by the public operations of this crate.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parameter file error: {0}")]
    Params(#[from] toml::de::Error),

    #[error("parameter serialization error: {0}")]
    ParamsSerialize(#[from] toml::ser::Error),
}

impl OverlayError {
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }
}

pub type Result<T> = std::result::Result<T, OverlayError>;
