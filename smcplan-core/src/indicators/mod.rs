//! Indicator implementations used by the plan pipeline.
//!
//! Indicators here are pure functions over the full candle window and return a
//! single current value rather than a per-candle series: the plan builder only
//! ever needs the latest reading.

pub mod atr;

pub use atr::{estimate as average_true_range, true_range};

/// Create candles whose high / low sit exactly 1.0 around each close.
///
/// Neighbouring candles share no high or low, so smooth peaks and troughs in
/// `closes` become strict swings.
#[cfg(test)]
pub fn make_swinging_candles(closes: &[f64]) -> Vec<crate::domain::Candle> {
    use crate::domain::Candle;
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            Candle::new(i as i64 * 60_000, close, close + 1.0, close - 1.0, close, 1000.0)
        })
        .collect()
}

/// Create candles from explicit `(open, high, low, close)` tuples for testing.
#[cfg(test)]
pub fn make_ohlc_candles(data: &[(f64, f64, f64, f64)]) -> Vec<crate::domain::Candle> {
    use crate::domain::Candle;
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| {
            Candle::new(i as i64 * 60_000, open, high, low, close, 1000.0)
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
