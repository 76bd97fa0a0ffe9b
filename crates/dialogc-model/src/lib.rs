//! POMDP construction for dialogc.
//!
//! Turns a validated [`ModelSpec`](dialogc_spec::ModelSpec) and its
//! per-question [`EffectiveNoiseTable`](dialogc_spec::EffectiveNoiseTable)s
//! into a [`CompiledModel`]: enumerated state and action spaces,
//! deterministic transitions, observation probabilities, rewards and
//! the initial belief.
//!
//! # State layout
//!
//! ```text
//! [ General(c) ..C ][ Question(q0, c) ..C ] ... [ Question(qN, c) ..C ][ Terminal(c) ..C ]
//! ```
//!
//! Builders address these contiguous blocks by index range; see
//! [`StateSpace`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action_space;
pub mod belief;
pub mod error;
pub mod model;
pub mod observation;
pub mod reward;
pub mod state_space;
pub mod transition;

pub use action_space::ActionSpace;
pub use belief::InitialBelief;
pub use error::ModelError;
pub use model::CompiledModel;
pub use observation::ObservationMatrix;
pub use reward::RewardMatrix;
pub use state_space::StateSpace;
pub use transition::TransitionTable;
