//! Sparse text exchange format for compiled dialog POMDPs.
//!
//! The format is line oriented and understood by point-based POMDP
//! solvers:
//!
//! ```text
//! discount: <float>
//! values: reward
//! states: <state>*
//! actions: <action>*
//! observations: <o_observation>*
//! start: <float>*
//! T : <action> : <from> : <to> <float>
//! O : * : <state> : <o_observation> <float>
//! R : <action> : <state> : * : * <float>
//! ```
//!
//! Only nonzero `T`, `O` and `R` entries are written. Floats use Rust's
//! shortest round-trip formatting, so [`PomdpDocument::parse`] recovers
//! exactly the values [`PomdpWriter`] emitted.
//!
//! # Labels
//!
//! | entity            | label                          |
//! |-------------------|--------------------------------|
//! | `General(c)`      | `S_<c>`                        |
//! | `Question(q, c)`  | `q_<q>_S_<c>`                  |
//! | `Terminal(c)`     | `tS_<c>`                       |
//! | `Wait` / `Finish` | `wait` / `finish`              |
//! | `Ask(q)`          | `qA_<q>`                       |
//! | `Classify(c)`     | `cA_<c>`                       |
//! | observation `o`   | `o_<o>`                        |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod labels;
pub mod reader;
pub mod writer;

pub use error::FormatError;
pub use labels::Labels;
pub use reader::PomdpDocument;
pub use writer::{PomdpWriter, WriteSummary};

/// Value of the `values:` header: rewards are maximised.
pub const VALUES_REWARD: &str = "reward";
