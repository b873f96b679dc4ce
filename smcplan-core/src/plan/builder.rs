//! Plan builder: runs the full pipeline over one candle window.
//!
//! Order of operations:
//! 1. Current price = close of the last candle
//! 2. ATR over the window
//! 3. Swing highs / lows
//! 4. Trend from the last two swings on each side
//! 5. Full-precision levels for LONG (from the last swing low) and SELL/EXIT
//!    (from the last swing high); a missing swing falls back to price ± ATR
//! 6. Round to cents and format the rule strings
//!
//! The builder is a pure function of its inputs. Calling it twice with the same
//! candles, timeframe and config yields identical output.

use super::levels::PlanLevels;
use crate::config::PipelineConfig;
use crate::domain::{AnalysisResult, Candle, InstrumentType, Plan, PlanSide};
use crate::indicators::atr;
use crate::numeric::round2;
use crate::structure::{swings, trend};
use thiserror::Error;

/// How many confirmation-timeframe candles a plan stays valid for.
pub const EXPIRY_CANDLES: usize = 12;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("cannot build plans from an empty candle sequence")]
    EmptyCandles,
}

/// Build both plans with the default pipeline parameters (ATR 14, swings 2/2).
pub fn build(candles: &[Candle], timeframe: &str) -> Result<AnalysisResult, PlanError> {
    build_with_config(candles, timeframe, &PipelineConfig::default())
}

/// Build both plans with explicit pipeline parameters.
pub fn build_with_config(
    candles: &[Candle],
    timeframe: &str,
    config: &PipelineConfig,
) -> Result<AnalysisResult, PlanError> {
    let last = candles.last().ok_or(PlanError::EmptyCandles)?;
    let price = last.close;

    let atr = atr::estimate(candles, config.atr_period);
    let swings = swings::detect(candles, config.swing_left, config.swing_right);
    let trend = trend::classify(&swings.highs, &swings.lows);

    let last_swing_high = swings.last_high().map_or(price + atr, |p| p.price);
    let last_swing_low = swings.last_low().map_or(price - atr, |p| p.price);

    if swings.highs.is_empty() || swings.lows.is_empty() {
        log::debug!(
            "plan: missing swings (highs={}, lows={}), falling back to price ± ATR",
            swings.highs.len(),
            swings.lows.len()
        );
    }

    let long = PlanLevels::derive(PlanSide::Long, last_swing_low, atr);
    let sell_exit = PlanLevels::derive(PlanSide::SellExit, last_swing_high, atr);

    log::debug!(
        "plan: price={price} atr={atr} trend={trend} swing_high={} swing_low={}",
        last_swing_high,
        last_swing_low
    );

    Ok(AnalysisResult {
        price_now: round2(price),
        trend_hint: trend,
        atr: round2(atr),
        plans: [present(&long, timeframe), present(&sell_exit, timeframe)],
    })
}

/// Round levels to cents and attach the human-readable rules.
fn present(levels: &PlanLevels, timeframe: &str) -> Plan {
    let zone = (round2(levels.zone_low), round2(levels.zone_high));
    let stop = round2(levels.stop_loss);

    let (entry_rule, invalidation) = match levels.side {
        PlanSide::Long => (
            format!("{timeframe} close > {} then retest zone", zone.1),
            format!("{timeframe} close < {stop}"),
        ),
        PlanSide::SellExit => (
            format!(
                "{timeframe} close < {} then retest zone (sell/exit signal)",
                zone.0
            ),
            format!("{timeframe} close > {stop}"),
        ),
    };

    Plan {
        side: levels.side,
        instrument: InstrumentType::Spot,
        confirmation_tf: timeframe.to_string(),
        entry_rule,
        entry_zone: zone,
        stop_loss: stop,
        targets: levels.targets.map(round2),
        invalidation,
        expiry: format!("if no trigger within {EXPIRY_CANDLES} candles on {timeframe}, cancel"),
    }
}
