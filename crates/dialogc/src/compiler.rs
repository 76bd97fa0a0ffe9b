//! The compile pipeline: load, compose noise, build, serialise.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use dialogc_format::{PomdpWriter, WriteSummary};
use dialogc_model::CompiledModel;
use dialogc_spec::{compose_all, ConfusionMatrix, ConfusionSource, ModelSpec, SpecLoader};
use tracing::{debug, info, info_span};

use crate::config::CompilerConfig;
use crate::error::CompileError;

/// Runs the full specification-to-model pipeline.
///
/// Every stage consumes immutable input and produces a new value.
/// Nothing is written until the whole model has been built in memory.
///
/// # Examples
///
/// ```
/// use dialogc::{Compiler, IdentityConfusion};
///
/// let doc = r#"{
///     "Classifications": ["yes", "no"],
///     "Observations": ["a", "b"],
///     "Questions": {"q1": {"English": "Yes?", "Effect": {"yes": {"a": 0.9, "b": 0.1}}}},
///     "Rewards": {"Success": 10, "Failure": -30, "Question": -5, "Wait": -0.0001},
///     "Time Discount": 0.99
/// }"#;
/// let compiler = Compiler::default();
/// let model = compiler.compile_str(doc, &IdentityConfusion).unwrap();
///
/// let mut out = Vec::new();
/// compiler.write(&model, &mut out).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.starts_with("discount: 0.99\nvalues: reward\n"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    /// A compiler with a validated configuration.
    pub fn new(config: CompilerConfig) -> Result<Self, CompileError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile a specification held in memory.
    pub fn compile_str(
        &self,
        doc: &str,
        source: &dyn ConfusionSource,
    ) -> Result<CompiledModel, CompileError> {
        let (spec, confusion) = self.loader().load_str(doc, source)?;
        self.build(spec, &confusion)
    }

    /// Compile a specification read from `reader`.
    pub fn compile_reader<R: Read>(
        &self,
        reader: R,
        source: &dyn ConfusionSource,
    ) -> Result<CompiledModel, CompileError> {
        let (spec, confusion) = self.loader().load_reader(reader, source)?;
        self.build(spec, &confusion)
    }

    /// Compile the specification file at `spec_path`.
    pub fn compile_path(
        &self,
        spec_path: &Path,
        source: &dyn ConfusionSource,
    ) -> Result<CompiledModel, CompileError> {
        let doc =
            fs::read_to_string(spec_path).map_err(|e| CompileError::io(spec_path, e))?;
        self.compile_str(&doc, source)
    }

    /// Serialise `model` to `writer`.
    pub fn write<W: Write>(
        &self,
        model: &CompiledModel,
        writer: W,
    ) -> Result<WriteSummary, CompileError> {
        let mut out = PomdpWriter::new(writer);
        let summary = out.write_model(model)?;
        out.flush()?;
        Ok(summary)
    }

    /// Compile `spec_path` and write the result to `out_path`.
    ///
    /// The model is serialised into a temporary sibling of `out_path`
    /// and renamed over it only once complete. On any error `out_path`
    /// is left untouched and the temporary file is removed.
    pub fn compile_to_path(
        &self,
        spec_path: &Path,
        source: &dyn ConfusionSource,
        out_path: &Path,
    ) -> Result<WriteSummary, CompileError> {
        let _span = info_span!("compile", spec = %spec_path.display()).entered();

        let model = self.compile_path(spec_path, source)?;
        let temp = temp_sibling(out_path)?;

        let summary = match self.write_file(&model, &temp) {
            Ok(summary) => summary,
            Err(e) => {
                let _ = fs::remove_file(&temp);
                return Err(e);
            }
        };
        if let Err(e) = fs::rename(&temp, out_path) {
            let _ = fs::remove_file(&temp);
            return Err(CompileError::io(out_path, e));
        }

        info!(
            out = %out_path.display(),
            states = model.states().len(),
            actions = model.actions().len(),
            transitions = summary.transitions,
            observations = summary.observations,
            rewards = summary.rewards,
            "model written"
        );
        Ok(summary)
    }

    fn loader(&self) -> SpecLoader {
        SpecLoader::new().with_column_tolerance(self.config.column_tolerance)
    }

    fn build(
        &self,
        spec: ModelSpec,
        confusion: &ConfusionMatrix,
    ) -> Result<CompiledModel, CompileError> {
        let workers = self.config.resolved_noise_workers();
        debug!(
            questions = spec.question_count(),
            workers,
            "composing noise"
        );
        let tables = compose_all(&spec, confusion, workers)?;
        let model = CompiledModel::build(spec, tables, self.config.row_tolerance)?;
        Ok(model)
    }

    fn write_file(&self, model: &CompiledModel, path: &Path) -> Result<WriteSummary, CompileError> {
        let file = File::create(path).map_err(|e| CompileError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        let summary = self.write(model, &mut writer)?;
        let file = writer
            .into_inner()
            .map_err(|e| CompileError::io(path, e.into_error()))?;
        file.sync_all().map_err(|e| CompileError::io(path, e))?;
        Ok(summary)
    }
}

/// Compile `spec_path` with the default configuration and write the
/// result atomically to `out_path`.
pub fn compile_to_path(
    spec_path: &Path,
    source: &dyn ConfusionSource,
    out_path: &Path,
) -> Result<WriteSummary, CompileError> {
    Compiler::default().compile_to_path(spec_path, source, out_path)
}

/// `dir/.name.tmp` for `dir/name`.
fn temp_sibling(out_path: &Path) -> Result<PathBuf, CompileError> {
    let Some(name) = out_path.file_name() else {
        return Err(CompileError::io(
            out_path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "output path has no file name"),
        ));
    };
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(name);
    temp_name.push(".tmp");
    Ok(out_path.with_file_name(temp_name))
}
