//! Trend classification from the two latest swing highs and swing lows.

use crate::domain::{SwingPoint, Trend};

/// Higher highs and higher lows are bullish, lower highs and lower lows are
/// bearish. Everything else, including fewer than two swings on either side
/// and equal prices, is neutral.
pub fn classify(highs: &[SwingPoint], lows: &[SwingPoint]) -> Trend {
    let (Some((h1, h2)), Some((l1, l2))) = (last_pair(highs), last_pair(lows)) else {
        return Trend::Neutral;
    };

    if h2 < h1 && l2 < l1 {
        Trend::Bearish
    } else if h2 > h1 && l2 > l1 {
        Trend::Bullish
    } else {
        Trend::Neutral
    }
}

/// Prices of the second-to-last and last swing points.
fn last_pair(points: &[SwingPoint]) -> Option<(f64, f64)> {
    match points {
        [.., a, b] => Some((a.price, b.price)),
        _ => None,
    }
}
