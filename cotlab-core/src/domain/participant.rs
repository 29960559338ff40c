//! COT report types and the participant categories each one breaks out.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which Commitments of Traders report a positioning series comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Legacy,
    Tff,
    Disaggregated,
}

/// Currency and US index futures carry the Traders in Financial Futures report.
const TFF_TICKERS: &[&str] = &[
    "DX=F", "6C=F", "6A=F", "6E=F", "6B=F", "6S=F", "6N=F", "6J=F", "NQ=F", "ES=F", "YM=F",
    "RTY=F",
];

/// Agricultural, energy and metals futures carry the Disaggregated report.
const DISAGG_TICKERS: &[&str] = &[
    "CC=F", "ZS=F", "SB=F", "KC=F", "ZW=F", "ZC=F", "CL=F", "NG=F", "PA=F", "GC=F", "SI=F",
    "PL=F", "HG=F",
];

impl ReportType {
    pub const ALL: [ReportType; 3] = [Self::Legacy, Self::Tff, Self::Disaggregated];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Tff => "tff",
            Self::Disaggregated => "disaggregated",
        }
    }

    /// The three categories this report breaks out, in display order.
    pub fn categories(&self) -> [ParticipantCategory; 3] {
        use ParticipantCategory::*;
        match self {
            Self::Legacy => [Commercial, LargeSpec, SmallSpec],
            Self::Tff => [Dealer, AssetManager, LeveragedFunds],
            Self::Disaggregated => [ProducerMerchant, SwapDealer, ManagedMoney],
        }
    }

    /// Whether `ticker` publishes this report. Legacy is always available.
    pub fn is_available_for(&self, ticker: &str) -> bool {
        match self {
            Self::Legacy => true,
            Self::Tff => TFF_TICKERS.contains(&ticker),
            Self::Disaggregated => DISAGG_TICKERS.contains(&ticker),
        }
    }

    pub fn available_for(ticker: &str) -> Vec<ReportType> {
        Self::ALL
            .into_iter()
            .filter(|r| r.is_available_for(ticker))
            .collect()
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "tff" => Ok(Self::Tff),
            "disaggregated" | "disagg" => Ok(Self::Disaggregated),
            _ => Err(ConfigError::UnknownReportType(s.to_string())),
        }
    }
}

/// Whether to read a category's 0–100 index or its raw net position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Index,
    Net,
}

/// A market-participant category of one report type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantCategory {
    // legacy
    Commercial,
    LargeSpec,
    SmallSpec,
    // tff
    Dealer,
    AssetManager,
    LeveragedFunds,
    // disaggregated
    ProducerMerchant,
    SwapDealer,
    ManagedMoney,
}

impl ParticipantCategory {
    pub fn report_type(&self) -> ReportType {
        match self {
            Self::Commercial | Self::LargeSpec | Self::SmallSpec => ReportType::Legacy,
            Self::Dealer | Self::AssetManager | Self::LeveragedFunds => ReportType::Tff,
            Self::ProducerMerchant | Self::SwapDealer | Self::ManagedMoney => {
                ReportType::Disaggregated
            }
        }
    }

    /// Upstream column prefix shared by the `_index` and `_net` fields.
    fn field_stem(&self) -> &'static str {
        match self {
            Self::Commercial => "commercial",
            Self::LargeSpec => "large_spec",
            Self::SmallSpec => "small_spec",
            Self::Dealer => "dealer",
            Self::AssetManager => "asset",
            Self::LeveragedFunds => "lev",
            Self::ProducerMerchant => "pm",
            Self::SwapDealer => "swap",
            Self::ManagedMoney => "mm",
        }
    }

    pub fn index_key(&self) -> String {
        format!("{}_index", self.field_stem())
    }

    pub fn net_key(&self) -> String {
        format!("{}_net", self.field_stem())
    }

    pub fn field_key(&self, kind: FieldKind) -> String {
        match kind {
            FieldKind::Index => self.index_key(),
            FieldKind::Net => self.net_key(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Commercial => "Commercials",
            Self::LargeSpec => "Large Spec",
            Self::SmallSpec => "Small Spec",
            Self::Dealer => "Dealer",
            Self::AssetManager => "Asset Mgr",
            Self::LeveragedFunds => "Lev Funds",
            Self::ProducerMerchant => "Prod/Merc",
            Self::SwapDealer => "Swap Dlr",
            Self::ManagedMoney => "Mng Money",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commercial => "commercial",
            Self::LargeSpec => "large_spec",
            Self::SmallSpec => "small_spec",
            Self::Dealer => "dealer",
            Self::AssetManager => "asset_manager",
            Self::LeveragedFunds => "leveraged_funds",
            Self::ProducerMerchant => "producer_merchant",
            Self::SwapDealer => "swap_dealer",
            Self::ManagedMoney => "managed_money",
        }
    }

    /// Check this category belongs to `report_type`.
    pub fn ensure_in(&self, report_type: ReportType) -> Result<(), ConfigError> {
        if self.report_type() == report_type {
            Ok(())
        } else {
            Err(ConfigError::ParticipantMismatch {
                participant: self.as_str().to_string(),
                report_type: report_type.to_string(),
            })
        }
    }
}

impl fmt::Display for ParticipantCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParticipantCategory {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ReportType::ALL
            .iter()
            .flat_map(|r| r.categories())
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| ConfigError::UnknownParticipant(s.to_string()))
    }
}
