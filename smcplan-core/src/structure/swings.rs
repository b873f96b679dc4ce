//! Swing detection: strict local extrema over a candle window.
//!
//! Candle `i` is a swing high when its high is the window maximum and strictly
//! above every other high in `[i-left, i+right]`. Swing lows mirror this with
//! minimum and strict-less-than. Only indices in `[left, len-right-1]` are
//! examined, so the first `left` and last `right` candles never qualify.
//!
//! A candle can be both a swing high and a swing low: an outside candle that
//! engulfs every neighbour, or any single candle when `left + right == 0`. No
//! mutual exclusion is enforced.

use crate::domain::{Candle, SwingPoint, Swings};

/// Default number of candles on each side of a swing candidate.
pub const DEFAULT_LEFT: usize = 2;
pub const DEFAULT_RIGHT: usize = 2;

/// Scan a candle window left to right for swing highs and lows.
///
/// Output sequences are in increasing index order.
pub fn detect(candles: &[Candle], left: usize, right: usize) -> Swings {
    let n = candles.len();
    let mut swings = Swings::default();

    // Needs n >= left + right + 1, written so huge windows cannot overflow.
    if n <= left || n - left <= right {
        return swings;
    }

    for i in left..(n - right) {
        let window = &candles[i - left..=i + right];
        let center = left;

        let high = candles[i].high;
        if is_strict_extreme(window, center, high, |c| c.high, |a, b| a > b) {
            swings.highs.push(SwingPoint::new(i, high));
        }

        let low = candles[i].low;
        if is_strict_extreme(window, center, low, |c| c.low, |a, b| a < b) {
            swings.lows.push(SwingPoint::new(i, low));
        }
    }

    log::debug!(
        "swings: {} highs, {} lows over {n} candles (left={left}, right={right})",
        swings.highs.len(),
        swings.lows.len()
    );

    swings
}

/// True when `value` beats every other window member under `beats`.
///
/// Beating every neighbour strictly also makes `value` the window extreme, so
/// the "equals window max/min" check is implied. NaN never beats anything.
fn is_strict_extreme(
    window: &[Candle],
    center: usize,
    value: f64,
    field: impl Fn(&Candle) -> f64,
    beats: impl Fn(f64, f64) -> bool,
) -> bool {
    if value.is_nan() {
        return false;
    }
    window
        .iter()
        .enumerate()
        .filter(|&(k, _)| k != center)
        .all(|(_, c)| beats(value, field(c)))
}
