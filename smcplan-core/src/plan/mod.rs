//! Plan construction: full-precision levels and the rounded LONG / SELL-EXIT plans.

pub mod builder;
pub mod levels;

pub use builder::{build, build_with_config, PlanError, EXPIRY_CANDLES};
pub use levels::PlanLevels;
