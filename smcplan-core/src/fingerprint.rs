//! Deterministic identification of analysis inputs.
//!
//! - `DatasetHash`: content hash of the candle window the plans were built from.
//! - `ConfigHash`: hash of the pipeline parameters.
//!
//! Both are BLAKE3 hex digests, so two reports with equal hashes were produced
//! from identical inputs.

use crate::config::PipelineConfig;
use crate::domain::Candle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Content hash of a candle sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetHash(pub String);

impl DatasetHash {
    /// Hash every candle field in order. NaN payloads hash by bit pattern.
    pub fn of_candles(candles: &[Candle]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(candles.len() as u64).to_le_bytes());
        for c in candles {
            hasher.update(&c.open_time.to_le_bytes());
            for field in [c.open, c.high, c.low, c.close, c.volume] {
                hasher.update(&field.to_bits().to_le_bytes());
            }
        }
        Self(hasher.finalize().to_hex().to_string())
    }
}

impl fmt::Display for DatasetHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hash of the pipeline parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigHash(pub String);

impl ConfigHash {
    pub fn of_config(config: &PipelineConfig) -> Self {
        let canonical = format!(
            "atr_period={};swing_left={};swing_right={}",
            config.atr_period, config.swing_left, config.swing_right
        );
        Self(blake3::hash(canonical.as_bytes()).to_hex().to_string())
    }

    /// First 12 hex chars, for display.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(12)]
    }
}

impl fmt::Display for ConfigHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
