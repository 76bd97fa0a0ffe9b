//! The assembled POMDP.

use dialogc_core::{QuestionId, StateId};
use dialogc_spec::{EffectiveNoiseTable, ModelSpec};
use tracing::debug;

use crate::action_space::ActionSpace;
use crate::belief::InitialBelief;
use crate::error::ModelError;
use crate::observation::ObservationMatrix;
use crate::reward::RewardMatrix;
use crate::state_space::StateSpace;
use crate::transition::TransitionTable;

/// A fully built dialog POMDP.
///
/// Produced once from a validated [`ModelSpec`] and its noise tables,
/// never mutated afterwards. Recompiling a changed specification
/// yields a new `CompiledModel`.
///
/// # Examples
///
/// ```
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
/// assert_eq!(model.states().len(), 6);
/// assert_eq!(model.actions().len(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct CompiledModel {
    spec: ModelSpec,
    states: StateSpace,
    actions: ActionSpace,
    transitions: TransitionTable,
    observations: ObservationMatrix,
    rewards: RewardMatrix,
    initial_belief: InitialBelief,
}

impl CompiledModel {
    /// Build every matrix from `spec` and its per-question noise tables.
    ///
    /// `tables` must come from [`compose_all`](dialogc_spec::compose_all)
    /// on the same specification. Observation rows are checked against
    /// `row_tolerance`.
    pub fn build(
        spec: ModelSpec,
        tables: Vec<EffectiveNoiseTable>,
        row_tolerance: f64,
    ) -> Result<Self, ModelError> {
        let states = StateSpace::new(&spec);
        let actions = ActionSpace::new(&spec);

        let transitions = TransitionTable::build(&states, &actions);
        let observations =
            ObservationMatrix::build(&states, spec.observation_count(), &tables, row_tolerance)?;
        let rewards = RewardMatrix::build(&states, &actions, spec.rewards());
        let initial_belief = InitialBelief::new(&states);

        debug!(
            states = states.len(),
            actions = actions.len(),
            observations = spec.observation_count(),
            "model built"
        );

        Ok(Self {
            spec,
            states,
            actions,
            transitions,
            observations,
            rewards,
            initial_belief,
        })
    }

    /// The specification this model was built from.
    pub fn spec(&self) -> &ModelSpec {
        &self.spec
    }

    /// The state space.
    pub fn states(&self) -> &StateSpace {
        &self.states
    }

    /// The action space.
    pub fn actions(&self) -> &ActionSpace {
        &self.actions
    }

    /// Deterministic transitions.
    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    /// Observation probabilities.
    pub fn observations(&self) -> &ObservationMatrix {
        &self.observations
    }

    /// Immediate rewards.
    pub fn rewards(&self) -> &RewardMatrix {
        &self.rewards
    }

    /// Initial belief over states.
    pub fn initial_belief(&self) -> &InitialBelief {
        &self.initial_belief
    }

    /// Discount factor.
    pub fn discount(&self) -> f64 {
        self.spec.discount()
    }

    /// Human-readable text of question `q`.
    pub fn question_description(&self, q: QuestionId) -> &str {
        self.spec.question(q).description()
    }

    /// Total probability mass of the initial belief on `s`.
    pub fn start(&self, s: StateId) -> f64 {
        self.initial_belief.as_slice()[s.index()]
    }
}
