//! Plan output records.
//!
//! Everything in here is presentation-ready: prices are already rounded to two
//! decimals by the plan builder. Full-precision levels live in `plan::levels`.

use super::structure::Trend;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which scenario a plan describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanSide {
    #[serde(rename = "LONG")]
    Long,
    #[serde(rename = "SELL/EXIT")]
    SellExit,
}

impl PlanSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanSide::Long => "LONG",
            PlanSide::SellExit => "SELL/EXIT",
        }
    }
}

impl fmt::Display for PlanSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instrument the plan is written for. Only spot is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InstrumentType {
    #[default]
    #[serde(rename = "SPOT")]
    Spot,
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstrumentType::Spot => f.write_str("SPOT"),
        }
    }
}

/// One trading scenario with entry zone, stop and three targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub side: PlanSide,
    #[serde(rename = "type")]
    pub instrument: InstrumentType,
    pub confirmation_tf: String,
    pub entry_rule: String,
    /// `(low, high)`, serialized as a two-element array.
    pub entry_zone: (f64, f64),
    pub stop_loss: f64,
    /// Nearest target first.
    pub targets: [f64; 3],
    pub invalidation: String,
    pub expiry: String,
}

/// Summary plus the LONG and SELL/EXIT plans, in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub price_now: f64,
    pub trend_hint: Trend,
    pub atr: f64,
    pub plans: [Plan; 2],
}

impl AnalysisResult {
    pub fn long(&self) -> &Plan {
        &self.plans[0]
    }

    pub fn sell_exit(&self) -> &Plan {
        &self.plans[1]
    }

    /// True when the trend hint agrees with the plan's direction.
    pub fn trend_favors(&self, side: PlanSide) -> bool {
        matches!(
            (self.trend_hint, side),
            (Trend::Bullish, PlanSide::Long) | (Trend::Bearish, PlanSide::SellExit)
        )
    }
}
