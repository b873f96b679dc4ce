//! Binance spot klines source.
//!
//! Fetches the most recent candles from `GET /api/v3/klines`. Handles rate
//! limiting, IP bans, retries with exponential backoff and the circuit breaker.
//!
//! A kline row looks like
//! `[openTime, "open", "high", "low", "close", "volume", closeTime, ...]`
//! with prices encoded as decimal strings. Only the first six fields are used.

use super::circuit_breaker::CircuitBreaker;
use super::provider::{CandleRequest, CandleSource, DataError, DataSource};
use crate::domain::Candle;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

/// Kline intervals accepted by the Binance spot API.
pub const INTERVALS: [&str; 15] = [
    "1m", "3m", "5m", "15m", "30m", "1h", "2h", "4h", "6h", "8h", "12h", "1d", "3d", "1w", "1M",
];

/// Binance error code for an unknown symbol.
const INVALID_SYMBOL: i64 = -1121;

/// Binance error body: `{"code": -1121, "msg": "Invalid symbol."}`.
#[derive(Debug, Deserialize)]
struct ApiError {
    code: i64,
    msg: String,
}

/// Binance spot market-data source.
pub struct BinanceSource {
    client: reqwest::blocking::Client,
    base_url: String,
    circuit_breaker: Arc<CircuitBreaker>,
    max_retries: u32,
    base_delay: Duration,
}

impl BinanceSource {
    pub fn new(circuit_breaker: Arc<CircuitBreaker>) -> Result<Self, DataError> {
        Self::with_base_url(DEFAULT_BASE_URL, circuit_breaker)
    }

    /// Point the source at another host (mirror, testnet, local stub).
    pub fn with_base_url(
        base_url: &str,
        circuit_breaker: Arc<CircuitBreaker>,
    ) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(concat!("smcplan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataError::NetworkUnreachable(format!("build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            circuit_breaker,
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        })
    }

    /// Reject intervals Binance does not serve before spending a request.
    pub fn validate_timeframe(timeframe: &str) -> Result<(), DataError> {
        if INTERVALS.contains(&timeframe) {
            Ok(())
        } else {
            Err(DataError::UnsupportedTimeframe {
                timeframe: timeframe.to_string(),
                valid: INTERVALS.join(", "),
            })
        }
    }

    /// Build the klines URL for a request.
    fn klines_url(&self, request: &CandleRequest) -> String {
        format!(
            "{}/api/v3/klines?symbol={}&interval={}&limit={}",
            self.base_url, request.symbol, request.timeframe, request.limit
        )
    }

    /// Execute the klines request with retry and circuit breaker logic.
    fn fetch_with_retry(&self, request: &CandleRequest) -> Result<Vec<Candle>, DataError> {
        if !self.circuit_breaker.is_allowed() {
            return Err(DataError::CircuitBreakerTripped);
        }

        let url = self.klines_url(request);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                log::warn!(
                    "binance: retrying {} {} in {delay:?} (attempt {attempt}/{})",
                    request.symbol,
                    request.timeframe,
                    self.max_retries
                );
                std::thread::sleep(delay);
            }

            if !self.circuit_breaker.is_allowed() {
                return Err(DataError::CircuitBreakerTripped);
            }

            log::debug!("binance: GET {url}");
            let resp = match self.client.get(&url).send() {
                Ok(resp) => resp,
                Err(e) if e.is_connect() || e.is_timeout() => {
                    last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                    continue;
                }
                Err(e) => return Err(DataError::NetworkUnreachable(e.to_string())),
            };

            let status = resp.status();
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());

            if status == StatusCode::IM_A_TEAPOT || status == StatusCode::FORBIDDEN {
                self.circuit_breaker
                    .trip_for(Duration::from_secs(retry_after.unwrap_or(0)));
                return Err(DataError::CircuitBreakerTripped);
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                self.circuit_breaker.record_failure();
                last_error = Some(DataError::RateLimited {
                    retry_after_secs: retry_after.unwrap_or(60),
                });
                continue;
            }

            if status.is_server_error() {
                self.circuit_breaker.record_failure();
                last_error = Some(upstream(format!("HTTP {status}")));
                continue;
            }

            let body = resp
                .text()
                .map_err(|e| DataError::NetworkUnreachable(format!("read response body: {e}")))?;

            if !status.is_success() {
                return Err(client_error(status, &body, &request.symbol));
            }

            let candles = parse_klines(&body)?;
            self.circuit_breaker.record_success();

            if candles.is_empty() {
                return Err(DataError::EmptyData {
                    symbol: request.symbol.clone(),
                    timeframe: request.timeframe.clone(),
                });
            }
            return Ok(candles);
        }

        Err(last_error.unwrap_or_else(|| upstream("max retries exceeded".into())))
    }
}

impl CandleSource for BinanceSource {
    fn name(&self) -> &str {
        "binance"
    }

    fn kind(&self) -> DataSource {
        DataSource::Binance
    }

    fn fetch(&self, request: &CandleRequest) -> Result<Vec<Candle>, DataError> {
        Self::validate_timeframe(&request.timeframe)?;
        let candles = self.fetch_with_retry(request)?;
        log::debug!(
            "binance: {} candles for {} {}",
            candles.len(),
            request.symbol,
            request.timeframe
        );
        Ok(candles)
    }
}

fn upstream(reason: String) -> DataError {
    DataError::UpstreamDataUnavailable {
        provider: "binance".into(),
        reason,
    }
}

/// Map a non-retryable 4xx response to a data error.
fn client_error(status: StatusCode, body: &str, symbol: &str) -> DataError {
    match serde_json::from_str::<ApiError>(body) {
        Ok(err) if err.code == INVALID_SYMBOL => DataError::SymbolNotFound {
            symbol: symbol.to_string(),
        },
        Ok(err) => upstream(format!("HTTP {status}: {} (code {})", err.msg, err.code)),
        Err(_) => upstream(format!("HTTP {status}")),
    }
}

/// Parse a klines response body into candles.
pub fn parse_klines(body: &str) -> Result<Vec<Candle>, DataError> {
    let rows: Vec<Vec<Value>> = serde_json::from_str(body)
        .map_err(|e| DataError::ResponseFormatChanged(format!("klines body: {e}")))?;
    rows.iter().map(|row| candle_from_kline(row)).collect()
}

/// Convert one kline row into a candle.
///
/// Prices may be decimal strings (as Binance sends them) or plain numbers.
pub fn candle_from_kline(row: &[Value]) -> Result<Candle, DataError> {
    if row.len() < 6 {
        return Err(DataError::ResponseFormatChanged(format!(
            "kline row has {} fields, expected at least 6",
            row.len()
        )));
    }

    let open_time = row[0]
        .as_i64()
        .ok_or_else(|| DataError::ResponseFormatChanged(format!("bad open time: {}", row[0])))?;

    let field = |i: usize| -> Result<f64, DataError> {
        let parsed = match &row[i] {
            Value::String(s) => s.parse::<f64>().ok(),
            Value::Number(n) => n.as_f64(),
            _ => None,
        };
        parsed.ok_or_else(|| {
            DataError::ResponseFormatChanged(format!("bad kline field {i}: {}", row[i]))
        })
    };

    Ok(Candle::new(
        open_time,
        field(1)?,
        field(2)?,
        field(3)?,
        field(4)?,
        field(5)?,
    ))
}
