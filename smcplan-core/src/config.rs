//! Serializable analyzer configuration.
//!
//! A config file has two optional sections:
//!
//! ```toml
//! [pipeline]
//! atr_period = 14
//! swing_left = 2
//! swing_right = 2
//!
//! [source]
//! symbol = "BTCUSDT"
//! timeframe = "15m"
//! limit = 500
//! ```
//!
//! Missing fields fall back to the defaults shown above.

use crate::indicators::atr;
use crate::structure::swings;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Binance caps a single klines request at this many candles.
pub const MAX_CANDLE_LIMIT: usize = 1000;

/// Upper bound for the ATR period and each swing side; no window is longer.
pub const MAX_LOOKBACK: usize = MAX_CANDLE_LIMIT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Structural parameters of the plan pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// ATR smoothing length.
    pub atr_period: usize,
    /// Candles left of a swing candidate.
    pub swing_left: usize,
    /// Candles right of a swing candidate.
    pub swing_right: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            atr_period: atr::DEFAULT_PERIOD,
            swing_left: swings::DEFAULT_LEFT,
            swing_right: swings::DEFAULT_RIGHT,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.atr_period == 0 || self.atr_period > MAX_LOOKBACK {
            return Err(ConfigError::Invalid(format!(
                "atr_period must be in 1..={MAX_LOOKBACK}, got {}",
                self.atr_period
            )));
        }
        let sides = [("swing_left", self.swing_left), ("swing_right", self.swing_right)];
        for (name, value) in sides {
            if value > MAX_LOOKBACK {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be <= {MAX_LOOKBACK}, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Where candles come from and which window to request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub symbol: String,
    pub timeframe: String,
    pub limit: usize,
    /// Override for the market-data REST endpoint (useful for mirrors and tests).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            symbol: "BTCUSDT".into(),
            timeframe: "15m".into(),
            limit: 500,
            base_url: None,
        }
    }
}

impl SourceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("symbol must not be empty".into()));
        }
        if self.timeframe.trim().is_empty() {
            return Err(ConfigError::Invalid("timeframe must not be empty".into()));
        }
        if self.limit == 0 || self.limit > MAX_CANDLE_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "limit must be in 1..={MAX_CANDLE_LIMIT}, got {}",
                self.limit
            )));
        }
        Ok(())
    }
}

/// Complete analyzer configuration as loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
}

impl AnalyzerConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pipeline.validate()?;
        self.source.validate()
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
