//! smcplan core: candles in, LONG and SELL/EXIT trading plans out.
//!
//! The pipeline is four pure stages run once per request:
//! - Volatility: ATR over the candle window (`indicators::atr`)
//! - Structure: swing highs / lows (`structure::swings`)
//! - Bias: trend from the last two swings (`structure::trend`)
//! - Plans: entry zone, stop and three targets per side (`plan`)
//!
//! Around it sit the candle sources (`data`), configuration (`config`) and the
//! report envelope (`report`). Nothing is cached between calls.

pub mod config;
pub mod data;
pub mod domain;
pub mod fingerprint;
pub mod indicators;
pub mod numeric;
pub mod plan;
pub mod report;
pub mod structure;

pub use config::{AnalyzerConfig, PipelineConfig};
pub use domain::{AnalysisResult, Candle, Plan, PlanSide, SwingPoint, Swings, Trend};
pub use plan::{build, build_with_config, PlanError};
pub use report::{analyze, AnalysisReport, AnalyzeError};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: pipeline inputs and outputs are Send + Sync, so
    /// concurrent callers can share them freely.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Candle>();
        require_sync::<domain::Candle>();
        require_send::<domain::Swings>();
        require_sync::<domain::Swings>();
        require_send::<domain::Plan>();
        require_sync::<domain::Plan>();
        require_send::<domain::AnalysisResult>();
        require_sync::<domain::AnalysisResult>();
        require_send::<plan::PlanLevels>();
        require_sync::<plan::PlanLevels>();
        require_send::<config::AnalyzerConfig>();
        require_sync::<config::AnalyzerConfig>();
        require_send::<report::AnalysisReport>();
        require_sync::<report::AnalysisReport>();
        require_send::<data::CircuitBreaker>();
        require_sync::<data::CircuitBreaker>();
        require_send::<data::BinanceSource>();
        require_sync::<data::BinanceSource>();
        require_send::<data::FileSource>();
        require_sync::<data::FileSource>();
    }

    /// Architecture contract: the plan builder never sees a candle source.
    ///
    /// `build_with_config` takes a candle slice, a timeframe label and the
    /// pipeline parameters. Fetching happens strictly before it, in `analyze`.
    #[test]
    fn plan_builder_takes_candles_not_sources() {
        fn _check(
            candles: &[Candle],
            config: &PipelineConfig,
        ) -> Result<AnalysisResult, PlanError> {
            build_with_config(candles, "15m", config)
        }
    }

    #[test]
    fn concurrent_builds_agree() {
        let candles: Vec<Candle> = (0..100)
            .map(|i| {
                let x = 100.0 + (i as f64 * 0.3).sin() * 4.0;
                Candle::new(i * 60_000, x, x + 1.0, x - 1.0, x + 0.2, 10.0)
            })
            .collect();
        let expected = build(&candles, "1h").unwrap();

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| build(&candles, "1h"))).collect();
            for h in handles {
                assert_eq!(h.join().unwrap().unwrap(), expected);
            }
        });
    }
}
