//! Candle: the fundamental market data unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV candle for one interval of a single symbol.
///
/// Field names serialize in the compact `t/o/h/l/c/v` form used by candle feeds;
/// the long names are accepted on input as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Open time in epoch milliseconds.
    #[serde(rename = "t", alias = "open_time")]
    pub open_time: i64,
    #[serde(rename = "o", alias = "open")]
    pub open: f64,
    #[serde(rename = "h", alias = "high")]
    pub high: f64,
    #[serde(rename = "l", alias = "low")]
    pub low: f64,
    #[serde(rename = "c", alias = "close")]
    pub close: f64,
    #[serde(rename = "v", alias = "volume", default)]
    pub volume: f64,
}

impl Candle {
    pub fn new(open_time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// High-low range of this candle.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Open time as a UTC timestamp, if it is representable.
    pub fn opened_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.open_time)
    }

    /// Returns true if any OHLC field is NaN.
    pub fn is_void(&self) -> bool {
        self.open.is_nan() || self.high.is_nan() || self.low.is_nan() || self.close.is_nan()
    }

    /// Basic OHLC sanity check: high >= low and both bracket open and close.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
    }
}
