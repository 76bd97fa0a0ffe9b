//! Core types for the dialogc POMDP compiler.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every stage of the pipeline: index types
//! for classifications, observations, questions, states and actions,
//! the tagged [`State`] and [`Action`] identities, numeric tolerances,
//! and the validation error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod error;
pub mod id;
pub mod state;
pub mod tolerance;

pub use action::Action;
pub use error::{LabelKind, MatrixError, ReferenceError, SpecError, ValidationError};
pub use id::{ActionId, ClassId, ObsId, QuestionId, StateId};
pub use state::State;
