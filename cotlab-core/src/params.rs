//! Serializable analysis parameters.
//!
//! Everything the asset-analysis view lets a user change lives here, so a
//! session can be saved to and restored from a TOML file.

use crate::data::LookbackRange;
use crate::domain::{FieldKind, ParticipantCategory, ReportType};
use crate::error::{ConfigError, Result};
use crate::overlays::ExtractOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Number of cycles selected automatically after a new scan.
pub const DEFAULT_AUTO_SELECT: usize = 5;

/// User-selected parameters for one asset view.
///
/// Tables are declared last so the struct serializes to valid TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    pub report_type: ReportType,
    pub participant: ParticipantCategory,
    pub field_kind: FieldKind,
    pub range: LookbackRange,
    pub show_projection: bool,
    pub auto_select: usize,
    pub selected_cycles: BTreeSet<String>,
    pub zones: ExtractOptions,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            report_type: ReportType::Legacy,
            participant: ParticipantCategory::Commercial,
            field_kind: FieldKind::Index,
            range: LookbackRange::All,
            show_projection: true,
            auto_select: DEFAULT_AUTO_SELECT,
            selected_cycles: BTreeSet::new(),
            zones: ExtractOptions::default(),
        }
    }
}

impl AnalysisParams {
    /// Parse and validate a TOML parameter file. Missing keys take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let params: Self = toml::from_str(s)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.participant.ensure_in(self.report_type)?;
        self.zones.validate()
    }

    /// Column the zone detectors read.
    pub fn field_key(&self) -> String {
        self.participant.field_key(self.field_kind)
    }

    /// Switch report type; the participant falls back to the report's first
    /// category when the current one is not part of it.
    pub fn with_report_type(mut self, report_type: ReportType) -> Self {
        self.report_type = report_type;
        if self.participant.report_type() != report_type {
            self.participant = report_type.categories()[0];
        }
        self
    }
}
