//! Exchange-format writer.
//!
//! [`PomdpWriter`] streams a [`CompiledModel`] to any `Write` sink,
//! headers first, then the sparse `T`, `O` and `R` sections.

use std::fmt::Display;
use std::io::Write;

use dialogc_model::CompiledModel;
use tracing::debug;

use crate::error::FormatError;
use crate::labels::Labels;
use crate::VALUES_REWARD;

/// Number of entries written per section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// `T` lines.
    pub transitions: usize,
    /// `O` lines.
    pub observations: usize,
    /// `R` lines.
    pub rewards: usize,
}

/// Writes compiled models to a byte stream.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`.
///
/// # Examples
///
/// ```
/// use dialogc_format::{PomdpDocument, PomdpWriter};
/// use dialogc_model::CompiledModel;
/// use dialogc_spec::{compose_all, IdentityConfusion, SpecLoader};
///
/// let doc = r#"{
///     "Classifications": ["yes", "no"],
///     "Observations": ["a", "b"],
///     "Questions": {"q1": {"English": "Yes?", "Effect": {"yes": {"a": 1}}}},
///     "Rewards": {"Success": 10, "Failure": -30, "Question": -5, "Wait": -1},
///     "Time Discount": 0.9
/// }"#;
/// let (spec, confusion) = SpecLoader::new().load_str(doc, &IdentityConfusion).unwrap();
/// let tables = compose_all(&spec, &confusion, 1).unwrap();
/// let model = CompiledModel::build(spec, tables, 1e-9).unwrap();
///
/// let mut buf = Vec::new();
/// let summary = PomdpWriter::new(&mut buf).write_model(&model).unwrap();
/// assert_eq!(summary.transitions, 30);
///
/// let text = String::from_utf8(buf).unwrap();
/// let parsed = PomdpDocument::parse(&text).unwrap();
/// assert_eq!(parsed.discount(), 0.9);
/// assert_eq!(parsed.transitions().len(), 30);
/// ```
pub struct PomdpWriter<W: Write> {
    writer: W,
    lines_written: u64,
}

impl<W: Write> PomdpWriter<W> {
    /// Wrap a sink.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            lines_written: 0,
        }
    }

    /// Write the whole model: headers, start vector, then every nonzero
    /// transition, observation and reward.
    pub fn write_model(&mut self, model: &CompiledModel) -> Result<WriteSummary, FormatError> {
        let labels = Labels::new(model);

        self.line(format_args!("discount: {}", model.discount()))?;
        self.line(format_args!("values: {VALUES_REWARD}"))?;
        self.list("states", labels.states())?;
        self.list("actions", labels.actions())?;
        self.list("observations", labels.observations())?;
        self.list("start", model.initial_belief().as_slice())?;

        let mut summary = WriteSummary::default();

        for (action, from, to, p) in model.transitions().iter() {
            self.line(format_args!(
                "T : {} : {} : {} {p}",
                labels.action(action),
                labels.state(from),
                labels.state(to)
            ))?;
            summary.transitions += 1;
        }

        for (state, obs, p) in model.observations().iter() {
            self.line(format_args!(
                "O : * : {} : {} {p}",
                labels.state(state),
                labels.observation(obs)
            ))?;
            summary.observations += 1;
        }

        for (action, state, r) in model.rewards().iter() {
            self.line(format_args!(
                "R : {} : {} : * : * {r}",
                labels.action(action),
                labels.state(state)
            ))?;
            summary.rewards += 1;
        }

        debug!(
            transitions = summary.transitions,
            observations = summary.observations,
            rewards = summary.rewards,
            "model serialised"
        );
        Ok(summary)
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), FormatError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of lines written so far.
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Consume the writer and return the underlying `Write` sink.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) -> Result<(), FormatError> {
        self.writer.write_fmt(args)?;
        self.writer.write_all(b"\n")?;
        self.lines_written += 1;
        Ok(())
    }

    fn list<T: Display>(&mut self, key: &str, items: &[T]) -> Result<(), FormatError> {
        write!(self.writer, "{key}:")?;
        for item in items {
            write!(self.writer, " {item}")?;
        }
        self.writer.write_all(b"\n")?;
        self.lines_written += 1;
        Ok(())
    }
}
