//! smcplan CLI: fetch candles and print LONG / SELL-EXIT plans.
//!
//! Commands:
//! - `analyze`: fetch a candle window from Binance (or load a local file) and
//!   print both plans as a table or as the JSON report
//! - `config`: print the default configuration as TOML

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use smcplan_core::data::{BinanceSource, CandleRequest, CandleSource, CircuitBreaker, FileSource};
use smcplan_core::{analyze, AnalysisReport, AnalyzerConfig, Plan};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "smcplan",
    version,
    about = "smcplan: ATR and market-structure trading plans for spot crypto"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build LONG and SELL/EXIT plans from the latest candle window.
    Analyze {
        /// Trading pair (e.g., BTCUSDT). Defaults to the config value.
        #[arg(long)]
        symbol: Option<String>,

        /// Candle interval (e.g., 15m, 1h, 4h). Defaults to the config value.
        #[arg(long)]
        timeframe: Option<String>,

        /// Number of most recent candles to use (1..=1000).
        #[arg(long)]
        limit: Option<usize>,

        /// Load candles from a local .csv or .json file instead of Binance.
        #[arg(long)]
        input: Option<PathBuf>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the full JSON report instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// ATR lookback.
        #[arg(long)]
        atr_period: Option<usize>,

        /// Candles left of a swing candidate.
        #[arg(long)]
        swing_left: Option<usize>,

        /// Candles right of a swing candidate.
        #[arg(long)]
        swing_right: Option<usize>,
    },
    /// Print the default configuration as TOML.
    Config,
}

/// Command-line overrides applied on top of the loaded config.
struct Overrides {
    symbol: Option<String>,
    timeframe: Option<String>,
    limit: Option<usize>,
    atr_period: Option<usize>,
    swing_left: Option<usize>,
    swing_right: Option<usize>,
}

impl Overrides {
    fn apply(self, config: &mut AnalyzerConfig) {
        if let Some(symbol) = self.symbol {
            config.source.symbol = symbol;
        }
        if let Some(timeframe) = self.timeframe {
            config.source.timeframe = timeframe;
        }
        if let Some(limit) = self.limit {
            config.source.limit = limit;
        }
        if let Some(period) = self.atr_period {
            config.pipeline.atr_period = period;
        }
        if let Some(left) = self.swing_left {
            config.pipeline.swing_left = left;
        }
        if let Some(right) = self.swing_right {
            config.pipeline.swing_right = right;
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            symbol,
            timeframe,
            limit,
            input,
            config,
            json,
            atr_period,
            swing_left,
            swing_right,
        } => {
            let overrides = Overrides {
                symbol,
                timeframe,
                limit,
                atr_period,
                swing_left,
                swing_right,
            };
            run_analyze(config, input, overrides, json)
        }
        Commands::Config => run_config(),
    }
}

fn run_analyze(
    config_path: Option<PathBuf>,
    input: Option<PathBuf>,
    overrides: Overrides,
    json: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => AnalyzerConfig::from_file(&path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };
    overrides.apply(&mut config);
    config.validate()?;
    log::debug!("effective config: {config:?}");

    let request = CandleRequest::from(&config.source);
    let source: Box<dyn CandleSource> = match input {
        Some(path) => Box::new(FileSource::new(path)?),
        None => {
            let breaker = Arc::new(CircuitBreaker::default_provider());
            let source = match config.source.base_url.as_deref() {
                Some(url) => BinanceSource::with_base_url(url, breaker)?,
                None => BinanceSource::new(breaker)?,
            };
            Box::new(source)
        }
    };

    let report = analyze(source.as_ref(), &request, &config.pipeline)?;

    if json {
        println!("{}", report.to_json_pretty()?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

fn run_config() -> Result<()> {
    print!("{}", AnalyzerConfig::default().to_toml()?);
    Ok(())
}

fn print_summary(report: &AnalysisReport) {
    let meta = &report.meta;
    let result = &report.result;

    println!("=== {} {} ({}) ===", meta.symbol, meta.timeframe, meta.mode);
    println!(
        "Candles:    {} ({} to {})",
        meta.candle_count,
        format_time(meta.first_candle),
        format_time(meta.last_candle)
    );
    println!("Price now:  {}", result.price_now);
    println!("ATR:        {:.4}", result.atr);
    println!("Trend hint: {}", result.trend_hint);
    println!("Dataset:    {}", meta.dataset_hash);
    println!("Config:     {}", meta.config_hash.short());
    println!();
    println!(
        "{:<10} {:<22} {:>12} {:<32}",
        "Side", "Entry zone", "Stop", "Targets"
    );
    println!("{}", "-".repeat(78));
    for plan in &result.plans {
        print_plan_row(plan);
    }
    println!();
    for plan in &result.plans {
        println!("{}:", plan.side);
        println!("  entry:        {}", plan.entry_rule);
        println!("  invalidation: {}", plan.invalidation);
        println!("  expiry:       {}", plan.expiry);
    }
    println!();
    println!("{}", report.disclaimer);
}

fn print_plan_row(plan: &Plan) {
    let zone = format!("{} - {}", plan.entry_zone.0, plan.entry_zone.1);
    let targets = plan
        .targets
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" / ");
    println!(
        "{:<10} {:<22} {:>12} {:<32}",
        plan.side.as_str(),
        zone,
        plan.stop_loss,
        targets
    );
}

fn format_time(t: Option<DateTime<Utc>>) -> String {
    t.map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "?".into())
}
