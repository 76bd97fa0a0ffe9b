//! Numeric tolerances used by validation and post-build checks.

/// Maximum deviation from 1.0 allowed for a confusion matrix column sum.
pub const COLUMN_SUM_TOLERANCE: f64 = 1e-6;

/// Maximum deviation from 1.0 allowed for a compiled observation row.
pub const ROW_SUM_TOLERANCE: f64 = 1e-9;

/// Whether `sum` is within `tolerance` of 1.0.
pub fn sums_to_one(sum: f64, tolerance: f64) -> bool {
    (sum - 1.0).abs() <= tolerance
}
