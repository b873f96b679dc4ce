//! Local candle files for offline analysis.
//!
//! Supported formats, chosen by extension:
//! - `.csv`: header row with `t,o,h,l,c,v` (or `open_time,open,high,low,close,volume`)
//! - `.json`: an array of candle objects, or an array of raw Binance kline rows
//!
//! Rows are sorted by open time, then the newest `limit` candles are kept.

use super::binance::candle_from_kline;
use super::provider::{keep_latest, CandleRequest, CandleSource, DataError, DataSource};
use crate::domain::Candle;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Csv,
    Json,
}

/// Candle source backed by a single CSV or JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: FileFormat,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, DataError> {
        let path = path.into();
        let format = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => FileFormat::Csv,
            Some("json") => FileFormat::Json,
            _ => {
                return Err(file_error(&path, "expected a .csv or .json file"));
            }
        };
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_csv(&self) -> Result<Vec<Candle>, DataError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| file_error(&self.path, e))?;

        reader
            .deserialize::<Candle>()
            .enumerate()
            .map(|(i, row)| row.map_err(|e| file_error(&self.path, format!("row {}: {e}", i + 1))))
            .collect()
    }

    fn read_json(&self) -> Result<Vec<Candle>, DataError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| file_error(&self.path, e))?;
        let rows: Vec<Value> =
            serde_json::from_str(&content).map_err(|e| file_error(&self.path, e))?;

        rows.into_iter()
            .map(|row| match row {
                Value::Array(fields) => candle_from_kline(&fields),
                other => serde_json::from_value::<Candle>(other)
                    .map_err(|e| file_error(&self.path, e)),
            })
            .collect()
    }
}

impl CandleSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    fn kind(&self) -> DataSource {
        match self.format {
            FileFormat::Csv => DataSource::CsvFile,
            FileFormat::Json => DataSource::JsonFile,
        }
    }

    fn fetch(&self, request: &CandleRequest) -> Result<Vec<Candle>, DataError> {
        let mut candles = match self.format {
            FileFormat::Csv => self.read_csv()?,
            FileFormat::Json => self.read_json()?,
        };

        if candles.is_empty() {
            return Err(DataError::EmptyData {
                symbol: request.symbol.clone(),
                timeframe: request.timeframe.clone(),
            });
        }

        candles.sort_by_key(|c| c.open_time);
        let insane = candles.iter().filter(|c| !c.is_sane()).count();
        if insane > 0 {
            log::warn!(
                "{}: {insane} of {} candles fail OHLC sanity checks",
                self.path.display(),
                candles.len()
            );
        }

        Ok(keep_latest(candles, request.limit))
    }
}

fn file_error(path: &Path, reason: impl std::fmt::Display) -> DataError {
    DataError::File {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
