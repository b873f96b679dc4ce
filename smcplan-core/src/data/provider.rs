//! Candle source trait and structured error types.
//!
//! The `CandleSource` trait abstracts over where candles come from (Binance REST,
//! local CSV/JSON files) so the CLI can swap implementations and tests can mock.
//! Sources hand back the candle window verbatim; the plan pipeline never
//! fetches anything itself.

use crate::config::SourceConfig;
use crate::domain::{Candle, Symbol};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error types for candle sources.
///
/// Every variant means the same thing to a caller: upstream data is unavailable
/// and no plan can be built. The variants exist so the message says why.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("upstream data unavailable from {provider}: {reason}")]
    UpstreamDataUnavailable { provider: String, reason: String },

    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("hard stop: data provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("unsupported timeframe '{timeframe}' (valid: {valid})")]
    UnsupportedTimeframe { timeframe: String, valid: String },

    #[error("no candles returned for {symbol} {timeframe}")]
    EmptyData { symbol: String, timeframe: String },

    #[error("read candle file {path}: {reason}")]
    File { path: String, reason: String },
}

/// Where a candle window came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Binance,
    CsvFile,
    JsonFile,
}

/// One request for a candle window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandleRequest {
    /// Uppercased, trimmed trading pair (e.g. `BTCUSDT`).
    pub symbol: Symbol,
    /// Opaque interval label (e.g. `15m`, `4h`).
    pub timeframe: String,
    /// Number of most recent candles to return.
    pub limit: usize,
}

impl CandleRequest {
    pub fn new(symbol: &str, timeframe: &str, limit: usize) -> Self {
        Self {
            symbol: symbol.trim().to_uppercase(),
            timeframe: timeframe.trim().to_string(),
            limit,
        }
    }
}

impl From<&SourceConfig> for CandleRequest {
    fn from(config: &SourceConfig) -> Self {
        Self::new(&config.symbol, &config.timeframe, config.limit)
    }
}

/// Trait for candle sources (Binance, files).
///
/// Implementations return candles ordered oldest first, at most `limit` of them.
pub trait CandleSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// What kind of source this is.
    fn kind(&self) -> DataSource;

    /// Fetch the most recent candle window for the request.
    fn fetch(&self, request: &CandleRequest) -> Result<Vec<Candle>, DataError>;
}

/// Keep only the newest `limit` candles of an ascending sequence.
pub(crate) fn keep_latest(mut candles: Vec<Candle>, limit: usize) -> Vec<Candle> {
    if candles.len() > limit {
        candles.drain(..candles.len() - limit);
    }
    candles
}
