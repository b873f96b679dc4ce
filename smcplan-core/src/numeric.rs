//! Shared numeric helpers for the plan pipeline.

/// Smallest value any volatility or risk estimate may take.
pub const EPSILON: f64 = 1e-9;

/// Floor a value at [`EPSILON`] so it can safely be used as a divisor.
///
/// NaN inputs also collapse to `EPSILON` (`f64::max` ignores a NaN operand).
pub fn floor_positive(value: f64) -> f64 {
    value.max(EPSILON)
}

/// Round a price to two decimal places for presentation.
///
/// Negative zero is normalised to `0.0` so it never prints as `-0`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}
