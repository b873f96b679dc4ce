//! Look-ahead tests for swing detection and ATR.
//!
//! Invariant: a swing at index i is confirmed once candle i + right exists.
//! Appending newer candles may add swings but never moves or removes a
//! confirmed one. ATR over a window depends only on that window.
//!
//! Method: detect on a truncated series (candles 0..100) and on the full series
//! (candles 0..200). Every swing the truncated run found must appear unchanged
//! in the full run, and the full run must find nothing else before the cutoff.

use smcplan_core::domain::{Candle, SwingPoint};
use smcplan_core::indicators::atr;
use smcplan_core::structure::detect_swings;

/// Generate N candles of synthetic OHLCV data with realistic variation.
fn make_test_candles(n: usize) -> Vec<Candle> {
    let mut candles = Vec::with_capacity(n);
    let mut price = 100.0;

    for i in 0..n {
        // Deterministic pseudo-random walk using a simple LCG
        let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
        let change = ((seed >> 33) % 200) as f64 * 0.05 - 5.0;
        price = (price + change).max(10.0);

        let open = price - 0.5;
        let close = price + 0.3;
        let high = open.max(close) + 1.0 + (i % 7) as f64 * 0.25;
        let low = open.min(close) - 1.0 - (i % 5) as f64 * 0.25;

        candles.push(Candle::new(i as i64 * 900_000, open, high, low, close, 1000.0));
    }

    candles
}

/// Swings whose confirmation window lies entirely inside `len` candles.
fn confirmed_before(points: &[SwingPoint], len: usize, right: usize) -> Vec<SwingPoint> {
    points
        .iter()
        .copied()
        .filter(|p| p.index + right < len)
        .collect()
}

fn assert_no_lookahead(full: &[Candle], truncated_len: usize, left: usize, right: usize) {
    let truncated = &full[..truncated_len];
    let full_swings = detect_swings(full, left, right);
    let truncated_swings = detect_swings(truncated, left, right);

    assert_eq!(
        truncated_swings.highs,
        confirmed_before(&full_swings.highs, truncated_len, right),
        "swing highs ({left},{right}): truncated run disagrees with full run"
    );
    assert_eq!(
        truncated_swings.lows,
        confirmed_before(&full_swings.lows, truncated_len, right),
        "swing lows ({left},{right}): truncated run disagrees with full run"
    );
}

#[test]
fn swings_default_window_no_lookahead() {
    let candles = make_test_candles(200);
    assert_no_lookahead(&candles, 100, 2, 2);
}

#[test]
fn swings_asymmetric_windows_no_lookahead() {
    let candles = make_test_candles(200);
    for (left, right) in [(1, 3), (3, 1), (5, 5), (0, 2), (2, 0)] {
        assert_no_lookahead(&candles, 100, left, right);
    }
}

#[test]
fn swings_every_cutoff_no_lookahead() {
    let candles = make_test_candles(80);
    for cut in 1..candles.len() {
        assert_no_lookahead(&candles, cut, 2, 2);
    }
}

#[test]
fn fixture_produces_swings_on_both_sides() {
    // Guard against a degenerate fixture making the tests above vacuous.
    let swings = detect_swings(&make_test_candles(200), 2, 2);
    assert!(swings.highs.len() > 5);
    assert!(swings.lows.len() > 5);
}

#[test]
fn atr_ignores_later_candles() {
    let candles = make_test_candles(200);
    let truncated = &candles[..100];
    let before = atr::estimate(truncated, 14);

    // Recomputing on the same prefix after the full series exists is unchanged.
    let _ = atr::estimate(&candles, 14);
    assert_eq!(atr::estimate(&candles[..100], 14), before);

    // ATR at the cutoff depends on the last 14 true ranges only; 16 candles is
    // the shortest window that still uses true ranges.
    let tail = &candles[100 - 16..100];
    assert_eq!(atr::estimate(tail, 14), before);
}
