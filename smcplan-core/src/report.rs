//! Report envelope: plans plus the metadata describing what they were built from.
//!
//! `analyze` is the one-call entry point used by the CLI: fetch a candle window
//! from a source, run the plan pipeline, wrap the result.

use crate::config::PipelineConfig;
use crate::data::{CandleRequest, CandleSource, DataError, DataSource};
use crate::domain::{AnalysisResult, Candle, Symbol};
use crate::fingerprint::{ConfigHash, DatasetHash};
use crate::plan::{self, PlanError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DISCLAIMER: &str = "Notice: this is an educational/informational report, not financial \
advice or an investment recommendation. Trading is high risk and you may lose capital. You are \
responsible for your decisions.";

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// What the plans were built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub market: String,
    pub symbol: Symbol,
    pub timeframe: String,
    pub mode: String,
    pub source: DataSource,
    pub candle_count: usize,
    pub first_candle: Option<DateTime<Utc>>,
    pub last_candle: Option<DateTime<Utc>>,
    pub dataset_hash: DatasetHash,
    pub config_hash: ConfigHash,
}

/// Full output of one analysis: metadata, disclaimer, plans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub meta: ReportMeta,
    pub disclaimer: String,
    pub result: AnalysisResult,
}

impl AnalysisReport {
    /// Build plans from an already loaded candle window.
    pub fn from_candles(
        candles: &[Candle],
        request: &CandleRequest,
        source: DataSource,
        config: &PipelineConfig,
    ) -> Result<Self, PlanError> {
        let result = plan::build_with_config(candles, &request.timeframe, config)?;

        let meta = ReportMeta {
            market: "crypto".into(),
            symbol: request.symbol.clone(),
            timeframe: request.timeframe.clone(),
            mode: "spot_only".into(),
            source,
            candle_count: candles.len(),
            first_candle: candles.first().and_then(Candle::opened_at),
            last_candle: candles.last().and_then(Candle::opened_at),
            dataset_hash: DatasetHash::of_candles(candles),
            config_hash: ConfigHash::of_config(config),
        };

        Ok(Self {
            meta,
            disclaimer: DISCLAIMER.to_string(),
            result,
        })
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Fetch candles for `request` and build the report.
pub fn analyze(
    source: &dyn CandleSource,
    request: &CandleRequest,
    config: &PipelineConfig,
) -> Result<AnalysisReport, AnalyzeError> {
    log::info!(
        "analyzing {} {} ({} candles from {})",
        request.symbol,
        request.timeframe,
        request.limit,
        source.name()
    );
    let candles = source.fetch(request)?;
    Ok(AnalysisReport::from_candles(
        &candles,
        request,
        source.kind(),
        config,
    )?)
}
