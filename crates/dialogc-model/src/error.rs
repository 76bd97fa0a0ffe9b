//! Error types for model construction.

use std::fmt;

use dialogc_core::StateId;

/// Errors detected while building a [`CompiledModel`](crate::CompiledModel).
///
/// Validation has already run by this point, so these indicate
/// inputs that did not come from the same specification, or a
/// numerical fault in the supplied noise tables.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelError {
    /// The number of noise tables differs from the number of questions.
    NoiseTableMismatch {
        /// Number of questions in the specification.
        expected: usize,
        /// Number of tables supplied.
        found: usize,
    },
    /// A noise table's shape differs from the specification's.
    NoiseTableShape {
        /// Index of the offending table.
        question: usize,
        /// Expected `(classes, observations)`.
        expected: (usize, usize),
        /// Found `(classes, observations)`.
        found: (usize, usize),
    },
    /// An observation row does not sum to 1 within tolerance.
    ObservationRow {
        /// The offending state.
        state: StateId,
        /// The computed row sum.
        sum: f64,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoiseTableMismatch { expected, found } => write!(
                f,
                "expected {expected} noise tables (one per question), got {found}"
            ),
            Self::NoiseTableShape {
                question,
                expected,
                found,
            } => write!(
                f,
                "noise table {question} is {}x{}, expected {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            Self::ObservationRow { state, sum } => {
                write!(f, "observation row for state {state} sums to {sum}, expected 1")
            }
        }
    }
}

impl std::error::Error for ModelError {}
