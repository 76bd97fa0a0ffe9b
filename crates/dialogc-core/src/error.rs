//! Validation error types.
//!
//! Organised by what was wrong: the specification document itself
//! ([`SpecError`]), the confusion matrix ([`MatrixError`]), or a name
//! inside a question's effect table ([`ReferenceError`]). The loader
//! reports the first violation it finds as a [`ValidationError`].

use std::error::Error;
use std::fmt;

/// The kind of label a validation error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelKind {
    /// An entry of `Classifications`.
    Classification,
    /// An entry of `Observations`.
    Observation,
    /// A key of `Questions`.
    Question,
    /// A rendered state label (`S_<c>`, `q_<q>_S_<c>`, `tS_<c>`).
    State,
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classification => write!(f, "classification"),
            Self::Observation => write!(f, "observation"),
            Self::Question => write!(f, "question"),
            Self::State => write!(f, "state"),
        }
    }
}

/// Errors in the structure or values of the specification document.
#[derive(Clone, Debug, PartialEq)]
pub enum SpecError {
    /// The document is not well-formed JSON or a value has the wrong type.
    Parse {
        /// Parser message, including line and column.
        reason: String,
    },
    /// The specification stream failed while being read.
    Read {
        /// The underlying I/O error message.
        reason: String,
    },
    /// A required key is absent. Nested keys use dotted paths,
    /// e.g. `Rewards.Success` or `Questions.q1.Effect`.
    MissingKey {
        /// Path of the missing key.
        key: String,
    },
    /// A label is empty or contains characters other than ASCII
    /// alphanumerics and underscore.
    InvalidLabel {
        /// Which label set the label belongs to.
        kind: LabelKind,
        /// The offending label.
        label: String,
    },
    /// A label appears more than once in its set.
    DuplicateLabel {
        /// Which label set the label belongs to.
        kind: LabelKind,
        /// The repeated label.
        label: String,
    },
    /// A label set that must be non-empty is empty.
    EmptyLabelSet {
        /// Which label set is empty.
        kind: LabelKind,
    },
    /// A numeric value is NaN or infinite.
    NonFiniteValue {
        /// Path of the offending key.
        key: String,
        /// The value found.
        value: f64,
    },
    /// `Time Discount` lies outside `[0, 1]`.
    DiscountOutOfRange {
        /// The value found.
        value: f64,
    },
    /// The `Question` reward is not strictly greater than the `Failure` reward.
    RewardOrdering {
        /// The `Question` reward.
        question: f64,
        /// The `Failure` reward.
        failure: f64,
    },
    /// An effect-table probability is negative or not finite.
    InvalidProbability {
        /// Question label.
        question: String,
        /// Classification label.
        classification: String,
        /// Observation label.
        observation: String,
        /// The value found.
        value: f64,
    },
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { reason } => write!(f, "malformed specification: {reason}"),
            Self::Read { reason } => write!(f, "specification could not be read: {reason}"),
            Self::MissingKey { key } => write!(f, "missing required key '{key}'"),
            Self::InvalidLabel { kind, label } => write!(
                f,
                "{kind} label '{label}' must be non-empty and contain only \
                 alphanumeric characters or underscore"
            ),
            Self::DuplicateLabel { kind, label } => {
                write!(f, "{kind} label '{label}' is declared more than once")
            }
            Self::EmptyLabelSet { kind } => write!(f, "at least one {kind} label is required"),
            Self::NonFiniteValue { key, value } => {
                write!(f, "'{key}' must be a finite number, got {value}")
            }
            Self::DiscountOutOfRange { value } => {
                write!(f, "'Time Discount' must be in [0, 1], got {value}")
            }
            Self::RewardOrdering { question, failure } => write!(
                f,
                "'Rewards.Question' ({question}) must be greater than 'Rewards.Failure' ({failure})"
            ),
            Self::InvalidProbability {
                question,
                classification,
                observation,
                value,
            } => write!(
                f,
                "probability for question '{question}', classification '{classification}', \
                 observation '{observation}' must be finite and non-negative, got {value}"
            ),
        }
    }
}

impl Error for SpecError {}

/// Errors in the shape or contents of a confusion matrix.
#[derive(Clone, Debug, PartialEq)]
pub enum MatrixError {
    /// The matrix document is not a well-formed JSON array of numeric rows.
    Parse {
        /// Parser message, including line and column.
        reason: String,
    },
    /// A row's length differs from the number of rows.
    NotSquare {
        /// Index of the first ragged row.
        row: usize,
        /// Length of that row.
        len: usize,
        /// Expected length (the number of rows).
        expected: usize,
    },
    /// The matrix dimension differs from the number of observations.
    WrongSize {
        /// Number of declared observations.
        expected: usize,
        /// Dimension of the supplied matrix.
        found: usize,
    },
    /// An entry is negative or not finite.
    InvalidEntry {
        /// Row index (observed symbol).
        row: usize,
        /// Column index (true symbol).
        column: usize,
        /// The value found.
        value: f64,
    },
    /// A column does not sum to 1 within tolerance.
    ColumnSum {
        /// Column index (true symbol).
        column: usize,
        /// The computed sum.
        sum: f64,
    },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { reason } => write!(f, "malformed confusion matrix: {reason}"),
            Self::NotSquare { row, len, expected } => write!(
                f,
                "confusion matrix is not square: row {row} has {len} entries, expected {expected}"
            ),
            Self::WrongSize { expected, found } => write!(
                f,
                "confusion matrix is {found}x{found}, expected {expected}x{expected} \
                 (one row and column per observation)"
            ),
            Self::InvalidEntry { row, column, value } => write!(
                f,
                "confusion matrix entry [{row}, {column}] must be finite and non-negative, got {value}"
            ),
            Self::ColumnSum { column, sum } => {
                write!(f, "confusion matrix column {column} sums to {sum}, expected 1")
            }
        }
    }
}

impl Error for MatrixError {}

/// A question's effect table names an undeclared label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReferenceError {
    /// The effect table is keyed by an undeclared classification.
    UnknownClassification {
        /// Question label.
        question: String,
        /// The undeclared classification.
        label: String,
    },
    /// A classification's row names an undeclared observation.
    UnknownObservation {
        /// Question label.
        question: String,
        /// Classification whose row holds the reference.
        classification: String,
        /// The undeclared observation.
        label: String,
    },
}

impl fmt::Display for ReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownClassification { question, label } => write!(
                f,
                "question '{question}' references undeclared classification '{label}'"
            ),
            Self::UnknownObservation {
                question,
                classification,
                label,
            } => write!(
                f,
                "question '{question}', classification '{classification}' references \
                 undeclared observation '{label}'"
            ),
        }
    }
}

impl Error for ReferenceError {}

/// The first violation found while loading a specification.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationError {
    /// The document itself is invalid.
    Spec(SpecError),
    /// The confusion matrix is invalid.
    Matrix(MatrixError),
    /// An effect table references an undeclared label.
    Reference(ReferenceError),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spec(e) => write!(f, "specification: {e}"),
            Self::Matrix(e) => write!(f, "confusion matrix: {e}"),
            Self::Reference(e) => write!(f, "reference: {e}"),
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Spec(e) => Some(e),
            Self::Matrix(e) => Some(e),
            Self::Reference(e) => Some(e),
        }
    }
}

impl From<SpecError> for ValidationError {
    fn from(e: SpecError) -> Self {
        Self::Spec(e)
    }
}

impl From<MatrixError> for ValidationError {
    fn from(e: MatrixError) -> Self {
        Self::Matrix(e)
    }
}

impl From<ReferenceError> for ValidationError {
    fn from(e: ReferenceError) -> Self {
        Self::Reference(e)
    }
}
