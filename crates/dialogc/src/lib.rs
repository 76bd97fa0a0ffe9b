//! dialogc: compiles dialog specifications into POMDP solver input.
//!
//! A specification declares classifications, observation symbols,
//! questions with their expected observation priors, reward constants
//! and a discount. Together with a sensor confusion matrix it is
//! compiled into a POMDP whose states track the belief about the true
//! classification, and written in a sparse text format that
//! point-based solvers read directly.
//!
//! This is the top-level facade crate. It re-exports the sub-crates and
//! adds the [`Compiler`] pipeline with atomic file output.
//!
//! # Quick start
//!
//! ```rust
//! use dialogc::prelude::*;
//!
//! let doc = r#"{
//!     "Classifications": ["yes", "no"],
//!     "Observations": ["a", "b"],
//!     "Questions": {
//!         "q1": {
//!             "English": "Is the answer yes?",
//!             "Effect": {"yes": {"a": 0.9, "b": 0.1}, "no": {"a": 0.2, "b": 0.8}}
//!         }
//!     },
//!     "Rewards": {"Success": 10, "Failure": -30, "Question": -5, "Wait": -0.0001},
//!     "Time Discount": 0.99
//! }"#;
//!
//! let compiler = Compiler::new(CompilerConfig::default()).unwrap();
//! let model = compiler.compile_str(doc, &IdentityConfusion).unwrap();
//! assert_eq!(model.states().len(), 6);
//! assert_eq!(model.actions().len(), 5);
//! assert_eq!(model.initial_belief().as_slice(), &[0.5, 0.5, 0.0, 0.0, 0.0, 0.0]);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `dialogc-core` | Ids, `State`/`Action`, tolerances, validation errors |
//! | [`spec`] | `dialogc-spec` | Loading, validation, confusion sources, noise composition |
//! | [`model`] | `dialogc-model` | State/action enumeration and POMDP matrices |
//! | [`format`] | `dialogc-format` | Sparse text writer and reader |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compiler;
pub mod config;
pub mod error;

pub use compiler::{compile_to_path, Compiler};
pub use config::{CompilerConfig, ConfigError};
pub use error::CompileError;

pub use dialogc_spec::{ConfusionMatrix, ConfusionSource, IdentityConfusion, RandomConfusion};

/// Ids, tagged states and actions, tolerances and validation errors
/// (`dialogc-core`).
pub use dialogc_core as types;

/// Specification loading and noise composition (`dialogc-spec`).
///
/// [`spec::SpecLoader`] validates a document against a
/// [`spec::ConfusionSource`]; [`spec::compose_all`] derives the
/// per-question effective noise tables.
pub use dialogc_spec as spec;

/// POMDP construction (`dialogc-model`).
///
/// [`model::CompiledModel`] bundles the state and action spaces,
/// transitions, observations, rewards and initial belief.
pub use dialogc_model as model;

/// Exchange format (`dialogc-format`).
///
/// Write with [`format::PomdpWriter`], read back with
/// [`format::PomdpDocument`].
pub use dialogc_format as format;

/// Common imports for typical dialogc usage.
///
/// ```rust
/// use dialogc::prelude::*;
/// ```
pub mod prelude {
    // Pipeline
    pub use crate::{compile_to_path, CompileError, Compiler, CompilerConfig};

    // Confusion sources
    pub use dialogc_spec::{ConfusionMatrix, ConfusionSource, IdentityConfusion, RandomConfusion};

    // Ids and tagged identities
    pub use dialogc_core::{Action, ActionId, ClassId, ObsId, QuestionId, State, StateId};

    // Model
    pub use dialogc_model::CompiledModel;

    // Format
    pub use dialogc_format::{PomdpDocument, PomdpWriter};
}
