//! Domain types for the plan pipeline

pub mod candle;
pub mod plan;
pub mod structure;

pub use candle::Candle;
pub use plan::{AnalysisResult, InstrumentType, Plan, PlanSide};
pub use structure::{SwingPoint, Swings, Trend};

/// Symbol type alias
pub type Symbol = String;
