//! Average True Range (ATR) as a single current-volatility estimate.
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|)
//! ATR here is the plain arithmetic mean of the last `period` true ranges.
//! Short windows (fewer than period+2 candles) fall back to the mean high-low
//! range. The result is always floored at `EPSILON`.

use crate::domain::Candle;
use crate::numeric::floor_positive;

/// Default ATR lookback.
pub const DEFAULT_PERIOD: usize = 14;

/// Compute the True Range series starting at the second candle.
///
/// `tr[k]` belongs to `candles[k + 1]`; the first candle has no previous close
/// and is skipped. Returns an empty vector for fewer than two candles.
pub fn true_range(candles: &[Candle]) -> Vec<f64> {
    candles
        .windows(2)
        .map(|pair| {
            let (prev, cur) = (&pair[0], &pair[1]);
            let h = cur.high;
            let l = cur.low;
            let pc = prev.close;
            (h - l).max((h - pc).abs()).max((l - pc).abs())
        })
        .collect()
}

/// Estimate current volatility from a chronologically ordered candle window.
///
/// `period` of zero is treated as one.
pub fn estimate(candles: &[Candle], period: usize) -> f64 {
    let period = period.max(1);
    let min_len = period.saturating_add(2);

    if candles.len() < min_len {
        let total: f64 = candles.iter().map(Candle::range).sum();
        let mean = total / candles.len().max(1) as f64;
        log::debug!(
            "atr: {} candles < period+2 ({}), using mean range {mean}",
            candles.len(),
            min_len
        );
        return floor_positive(mean);
    }

    let tr = true_range(candles);
    let recent = &tr[tr.len() - period..];
    let mean = recent.iter().sum::<f64>() / period as f64;
    floor_positive(mean)
}
