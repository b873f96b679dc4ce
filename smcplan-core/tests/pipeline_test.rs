//! End-to-end pipeline tests on hand-built candle windows.
//!
//! Each fixture is constructed so the intermediate values (ATR, swings, trend)
//! can be worked out by hand and the final plan levels checked exactly.

use smcplan_core::domain::{Candle, PlanSide, SwingPoint, Trend};
use smcplan_core::indicators::atr;
use smcplan_core::plan::{build, build_with_config};
use smcplan_core::structure::{classify_trend, detect_swings};
use smcplan_core::PipelineConfig;

/// Candles from `(low, high, close)` triples, one minute apart.
fn candles_lhc(data: &[(f64, f64, f64)]) -> Vec<Candle> {
    data.iter()
        .enumerate()
        .map(|(i, &(low, high, close))| {
            Candle::new(i as i64 * 60_000, close, high, low, close, 100.0)
        })
        .collect()
}

/// 20 candles, every range exactly 10 and every previous close inside the next
/// range, so each true range is 10 and ATR(14) = 10.
///
/// Index 12 (high 110) is the only swing high, index 15 (low 95) the only swing
/// low, and the last close is 100.
fn reference_window() -> Vec<Candle> {
    let mut data = Vec::new();
    for i in 0..20 {
        let low = match i {
            12 => 100.0,
            15 => 95.0,
            _ => 97.0,
        };
        data.push((low, low + 10.0, low + 5.0));
    }
    data[19].2 = 100.0;
    candles_lhc(&data)
}

/// Zigzag with higher highs and higher lows; range 2 per candle.
fn rising_zigzag() -> Vec<Candle> {
    let lows = [
        10.0, 11.0, 12.0, 14.0, 12.0, 11.0, 9.0, 11.0, 13.0, 16.0, 13.0, 12.0, 10.5, 12.0, 13.0,
        14.0, 15.0,
    ];
    let data: Vec<_> = lows.iter().map(|&l| (l, l + 2.0, l + 1.0)).collect();
    candles_lhc(&data)
}

/// The rising zigzag reflected around 100: lower highs and lower lows.
fn falling_zigzag() -> Vec<Candle> {
    let data: Vec<_> = rising_zigzag()
        .iter()
        .map(|c| (100.0 - c.high, 100.0 - c.low, 100.0 - c.close))
        .collect();
    candles_lhc(&data)
}

#[test]
fn reference_window_intermediates() {
    let candles = reference_window();
    assert_eq!(atr::estimate(&candles, 14), 10.0);

    let swings = detect_swings(&candles, 2, 2);
    assert_eq!(swings.highs, vec![SwingPoint::new(12, 110.0)]);
    assert_eq!(swings.lows, vec![SwingPoint::new(15, 95.0)]);
    assert_eq!(classify_trend(&swings.highs, &swings.lows), Trend::Neutral);
}

#[test]
fn reference_window_plan_levels() {
    let result = build(&reference_window(), "1h").unwrap();

    assert_eq!(result.price_now, 100.0);
    assert_eq!(result.atr, 10.0);
    assert_eq!(result.trend_hint, Trend::Neutral);

    let long = result.long();
    assert_eq!(long.side, PlanSide::Long);
    assert_eq!(long.entry_zone, (96.5, 99.5));
    assert_eq!(long.stop_loss, 91.5);
    assert_eq!(long.targets, [111.0, 117.5, 124.0]);
    assert_eq!(long.entry_rule, "1h close > 99.5 then retest zone");
    assert_eq!(long.invalidation, "1h close < 91.5");

    let sell = result.sell_exit();
    assert_eq!(sell.side, PlanSide::SellExit);
    assert_eq!(sell.entry_zone, (105.5, 108.5));
    assert_eq!(sell.stop_loss, 113.5);
    assert_eq!(sell.targets, [94.0, 87.5, 81.0]);
    assert_eq!(
        sell.entry_rule,
        "1h close < 105.5 then retest zone (sell/exit signal)"
    );
    assert_eq!(sell.invalidation, "1h close > 113.5");
    assert_eq!(sell.expiry, "if no trigger within 12 candles on 1h, cancel");
}

#[test]
fn rising_zigzag_is_bullish() {
    let candles = rising_zigzag();
    let swings = detect_swings(&candles, 2, 2);
    assert_eq!(
        swings.highs,
        vec![SwingPoint::new(3, 16.0), SwingPoint::new(9, 18.0)]
    );
    assert_eq!(
        swings.lows,
        vec![SwingPoint::new(6, 9.0), SwingPoint::new(12, 10.5)]
    );

    let result = build(&candles, "15m").unwrap();
    assert_eq!(result.trend_hint, Trend::Bullish);
    assert!(result.trend_favors(PlanSide::Long));
}

#[test]
fn falling_zigzag_is_bearish() {
    let result = build(&falling_zigzag(), "15m").unwrap();
    assert_eq!(result.trend_hint, Trend::Bearish);
    assert!(result.trend_favors(PlanSide::SellExit));
}

#[test]
fn plans_reference_latest_swings() {
    // Zigzag: last swing low 10.5, last swing high 18.
    let candles = rising_zigzag();
    let result = build(&candles, "15m").unwrap();
    let a = atr::estimate(&candles, 14);

    let round2 = |x: f64| (x * 100.0).round() / 100.0;
    assert_eq!(result.long().stop_loss, round2(10.5 - 0.35 * a));
    assert_eq!(result.sell_exit().stop_loss, round2(18.0 + 0.35 * a));
}

#[test]
fn build_is_idempotent() {
    let candles = rising_zigzag();
    let first = serde_json::to_string(&build(&candles, "4h").unwrap()).unwrap();
    let second = serde_json::to_string(&build(&candles, "4h").unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn default_config_matches_plain_build() {
    let candles = reference_window();
    assert_eq!(
        build(&candles, "1d").unwrap(),
        build_with_config(&candles, "1d", &PipelineConfig::default()).unwrap()
    );
}

#[test]
fn short_window_uses_mean_range_and_fallbacks() {
    // 3 candles: ATR falls back to mean range, no swings at all.
    let candles = candles_lhc(&[(99.0, 101.0, 100.0), (98.0, 102.0, 100.0), (97.0, 103.0, 100.0)]);
    let result = build(&candles, "1h").unwrap();
    assert_eq!(result.atr, 4.0);
    // Fallback references: 100 - 4 = 96 and 100 + 4 = 104.
    assert_eq!(result.long().entry_zone, (96.6, 97.8));
    assert_eq!(result.sell_exit().entry_zone, (102.2, 103.4));
}
