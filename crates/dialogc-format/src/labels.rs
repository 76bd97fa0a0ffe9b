//! Textual labels for states, actions and observations.

use dialogc_core::{Action, ActionId, ObsId, State, StateId};
use dialogc_model::CompiledModel;
use dialogc_spec::ModelSpec;

/// Label for `state`.
pub fn state_label(spec: &ModelSpec, state: State) -> String {
    spec.state_label(state)
}

/// Label for `action`.
pub fn action_label(spec: &ModelSpec, action: Action) -> String {
    match action {
        Action::Wait => "wait".to_owned(),
        Action::Finish => "finish".to_owned(),
        Action::Ask(q) => format!("qA_{}", spec.question(q).label()),
        Action::Classify(c) => format!("cA_{}", spec.class_label(c)),
    }
}

/// Label for observation `o`.
pub fn observation_label(spec: &ModelSpec, o: ObsId) -> String {
    format!("o_{}", spec.observation_label(o))
}

/// Every label of a compiled model, indexed by id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Labels {
    states: Vec<String>,
    actions: Vec<String>,
    observations: Vec<String>,
}

impl Labels {
    /// Render the labels of `model`.
    pub fn new(model: &CompiledModel) -> Self {
        let spec = model.spec();
        Self {
            states: model
                .states()
                .iter()
                .map(|(_, s)| state_label(spec, s))
                .collect(),
            actions: model
                .actions()
                .iter()
                .map(|(_, a)| action_label(spec, a))
                .collect(),
            observations: (0..spec.observation_count() as u32)
                .map(|o| observation_label(spec, ObsId(o)))
                .collect(),
        }
    }

    /// Label of state `s`.
    pub fn state(&self, s: StateId) -> &str {
        &self.states[s.index()]
    }

    /// Label of action `a`.
    pub fn action(&self, a: ActionId) -> &str {
        &self.actions[a.index()]
    }

    /// Label of observation `o`.
    pub fn observation(&self, o: ObsId) -> &str {
        &self.observations[o.index()]
    }

    /// State labels in state order.
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Action labels in action order.
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Observation labels in observation order.
    pub fn observations(&self) -> &[String] {
        &self.observations
    }
}
