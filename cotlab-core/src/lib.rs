//! COTLab Core — positioning zone signals and composite cycle overlays.
//!
//! This crate holds the local computation behind the asset-analysis view:
//! - Domain types (series points, participant categories, signals, cycles)
//! - Boundary normalization of service exports
//! - Hysteresis zone extraction over a positioning index
//! - Composite cycle reconstruction projected onto the price axis
//! - Lookback filtering and axis scaling helpers
//! - A parameter store that recomputes overlays when their inputs change

pub mod data;
pub mod domain;
pub mod error;
pub mod overlays;
pub mod params;
pub mod store;

pub use error::{ConfigError, OverlayError, Result};
pub use params::AnalysisParams;
pub use store::ParameterStore;
