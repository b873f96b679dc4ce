//! Market structure: swing points and the trend bias derived from them.

pub mod swings;
pub mod trend;

pub use swings::detect as detect_swings;
pub use trend::classify as classify_trend;
