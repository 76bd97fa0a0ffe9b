//! Specification loading and noise composition for dialogc.
//!
//! The loader turns a JSON dialog specification plus a confusion matrix
//! into an immutable [`ModelSpec`] in which every name has been resolved
//! to an index. The noise compositor then combines each question's
//! declared prior with the confusion matrix via Bayes' rule, yielding
//! one [`EffectiveNoiseTable`] per question.
//!
//! # Pipeline position
//!
//! ```text
//! JSON ──► SpecLoader ──► ModelSpec ──┬──► state/action spaces
//!            ▲                        │
//!  ConfusionSource ─► ConfusionMatrix ┴──► compose_all ──► [EffectiveNoiseTable]
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod confusion;
pub mod label;
pub mod loader;
pub mod noise;
pub mod spec;

mod raw;

pub use confusion::{ConfusionMatrix, ConfusionSource, IdentityConfusion, RandomConfusion};
pub use label::Label;
pub use loader::SpecLoader;
pub use noise::{compose_all, compose_question, EffectiveNoiseTable, NoiseError};
pub use spec::{EffectRow, ModelSpec, QuestionSpec, Rewards};
