//! Top-level compile error.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use dialogc_core::ValidationError;
use dialogc_format::FormatError;
use dialogc_model::ModelError;
use dialogc_spec::NoiseError;

use crate::config::ConfigError;

/// Errors from any stage of a compile.
#[derive(Debug)]
pub enum CompileError {
    /// The compiler configuration is invalid.
    Config(ConfigError),
    /// The specification or confusion matrix failed validation.
    Validation(ValidationError),
    /// Noise composition failed.
    Noise(NoiseError),
    /// Model construction failed.
    Model(ModelError),
    /// Serialisation failed.
    Format(FormatError),
    /// A file could not be read, written or renamed.
    Io {
        /// The offending path.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
}

impl CompileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Validation(e) => write!(f, "validation: {e}"),
            Self::Noise(e) => write!(f, "noise composition: {e}"),
            Self::Model(e) => write!(f, "model: {e}"),
            Self::Format(e) => write!(f, "output: {e}"),
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl Error for CompileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Validation(e) => Some(e),
            Self::Noise(e) => Some(e),
            Self::Model(e) => Some(e),
            Self::Format(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for CompileError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ValidationError> for CompileError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<NoiseError> for CompileError {
    fn from(e: NoiseError) -> Self {
        Self::Noise(e)
    }
}

impl From<ModelError> for CompileError {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}

impl From<FormatError> for CompileError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}
