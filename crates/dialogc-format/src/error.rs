//! Error types for the exchange format.

use std::fmt;
use std::io;

/// Errors from writing or parsing the exchange format.
#[derive(Debug)]
pub enum FormatError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// A line could not be parsed.
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        detail: String,
    },
    /// A `T`, `O` or `R` line names a label not declared in the headers.
    UnknownLabel {
        /// 1-based line number.
        line: usize,
        /// The undeclared label.
        label: String,
    },
    /// A required header is absent, or appears after a line that needs it.
    MissingHeader {
        /// Header key, e.g. `"states"`.
        header: &'static str,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Malformed { line, detail } => write!(f, "line {line}: {detail}"),
            Self::UnknownLabel { line, label } => {
                write!(f, "line {line}: undeclared label '{label}'")
            }
            Self::MissingHeader { header } => write!(f, "missing '{header}:' header"),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FormatError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
