//! Candle sources: Binance REST klines and local files

pub mod binance;
pub mod circuit_breaker;
pub mod file;
pub mod provider;

pub use binance::BinanceSource;
pub use circuit_breaker::CircuitBreaker;
pub use file::FileSource;
pub use provider::{CandleRequest, CandleSource, DataError, DataSource};
