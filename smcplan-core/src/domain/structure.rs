//! Market structure types: swing points and trend bias.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A local price extremum: candle index plus the extreme price (high or low).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwingPoint {
    pub index: usize,
    pub price: f64,
}

impl SwingPoint {
    pub fn new(index: usize, price: f64) -> Self {
        Self { index, price }
    }
}

impl From<(usize, f64)> for SwingPoint {
    fn from((index, price): (usize, f64)) -> Self {
        Self::new(index, price)
    }
}

/// Swing highs and swing lows, each in increasing index order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Swings {
    pub highs: Vec<SwingPoint>,
    pub lows: Vec<SwingPoint>,
}

impl Swings {
    pub fn last_high(&self) -> Option<SwingPoint> {
        self.highs.last().copied()
    }

    pub fn last_low(&self) -> Option<SwingPoint> {
        self.lows.last().copied()
    }
}

/// Coarse directional bias inferred from the two latest swing highs and lows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Bullish => "bullish",
            Trend::Bearish => "bearish",
            Trend::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
