//! Full-precision price levels for one plan side.
//!
//! Levels are expressed in ATR units around a structural reference price:
//!
//! | level        | LONG (ref = last swing low) | SELL/EXIT (ref = last swing high) |
//! |--------------|-----------------------------|-----------------------------------|
//! | zone low     | ref + 0.15 ATR              | ref - 0.45 ATR                    |
//! | zone high    | ref + 0.45 ATR              | ref - 0.15 ATR                    |
//! | stop         | ref - 0.35 ATR              | ref + 0.35 ATR                    |
//! | targets      | mid + {2,3,4} risk          | mid - {2,3,4} risk                |
//!
//! where `mid` is the zone midpoint and `risk = |mid - stop|` (floored at epsilon).

use crate::domain::PlanSide;
use crate::numeric::floor_positive;

/// Zone edge nearest the reference, in ATR.
pub const ZONE_NEAR_ATR: f64 = 0.15;
/// Zone edge farthest from the reference, in ATR.
pub const ZONE_FAR_ATR: f64 = 0.45;
/// Stop distance beyond the reference, in ATR.
pub const STOP_ATR: f64 = 0.35;
/// Target distances from the zone midpoint, in multiples of risk.
pub const TARGET_RISK_MULTIPLES: [f64; 3] = [2.0, 3.0, 4.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanLevels {
    pub side: PlanSide,
    pub zone_low: f64,
    pub zone_high: f64,
    pub stop_loss: f64,
    pub mid: f64,
    pub risk: f64,
    pub targets: [f64; 3],
}

impl PlanLevels {
    /// Derive levels for `side` from its structural reference price and ATR.
    pub fn derive(side: PlanSide, reference: f64, atr: f64) -> Self {
        // +1 places targets above the entry (long), -1 below it (sell/exit).
        let (zone_low, zone_high, stop_loss, direction) = match side {
            PlanSide::Long => (
                reference + ZONE_NEAR_ATR * atr,
                reference + ZONE_FAR_ATR * atr,
                reference - STOP_ATR * atr,
                1.0,
            ),
            PlanSide::SellExit => (
                reference - ZONE_FAR_ATR * atr,
                reference - ZONE_NEAR_ATR * atr,
                reference + STOP_ATR * atr,
                -1.0,
            ),
        };

        let mid = (zone_low + zone_high) / 2.0;
        let risk = floor_positive((mid - stop_loss).abs());
        let targets = TARGET_RISK_MULTIPLES.map(|m| mid + direction * m * risk);

        Self {
            side,
            zone_low,
            zone_high,
            stop_loss,
            mid,
            risk,
            targets,
        }
    }
}
