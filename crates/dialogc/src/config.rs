//! Compiler configuration and its validation.

use std::error::Error;
use std::fmt;

use dialogc_core::tolerance::{COLUMN_SUM_TOLERANCE, ROW_SUM_TOLERANCE};

/// Largest accepted confusion matrix column tolerance.
const MAX_COLUMN_TOLERANCE: f64 = 1e-2;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`CompilerConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `column_tolerance` is not finite or outside `(0, 1e-2]`.
    InvalidColumnTolerance {
        /// The configured value.
        value: f64,
    },
    /// `row_tolerance` is not finite or not positive.
    InvalidRowTolerance {
        /// The configured value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColumnTolerance { value } => write!(
                f,
                "column_tolerance must be finite and in (0, {MAX_COLUMN_TOLERANCE}], got {value}"
            ),
            Self::InvalidRowTolerance { value } => {
                write!(f, "row_tolerance must be finite and positive, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

// ── CompilerConfig ─────────────────────────────────────────────────

/// Builder-input for a [`Compiler`](crate::Compiler).
#[derive(Clone, Debug, PartialEq)]
pub struct CompilerConfig {
    /// Worker threads for per-question noise composition. `None` runs
    /// serially.
    pub noise_workers: Option<usize>,
    /// Confusion matrix column-sum tolerance. Default: `1e-6`.
    pub column_tolerance: f64,
    /// Compiled observation-row tolerance. Default: `1e-9`.
    pub row_tolerance: f64,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            noise_workers: None,
            column_tolerance: COLUMN_SUM_TOLERANCE,
            row_tolerance: ROW_SUM_TOLERANCE,
        }
    }
}

impl CompilerConfig {
    /// Check the tolerances.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let col = self.column_tolerance;
        if !(col.is_finite() && col > 0.0 && col <= MAX_COLUMN_TOLERANCE) {
            return Err(ConfigError::InvalidColumnTolerance { value: col });
        }
        let row = self.row_tolerance;
        if !(row.is_finite() && row > 0.0) {
            return Err(ConfigError::InvalidRowTolerance { value: row });
        }
        Ok(())
    }

    /// Resolve the noise worker count.
    ///
    /// `None` means one worker. Explicit values are clamped to `[1, 64]`.
    pub fn resolved_noise_workers(&self) -> usize {
        match self.noise_workers {
            Some(n) => n.clamp(1, 64),
            None => 1,
        }
    }
}
