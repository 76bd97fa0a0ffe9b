//! Deterministic transition table.
//!
//! Every action moves every state to exactly one successor with
//! probability 1, so the table stores one successor per
//! `(action, state)` pair instead of a dense `|S| × |S|` matrix per
//! action.

use dialogc_core::{Action, ActionId, State, StateId};

use crate::action_space::ActionSpace;
use crate::state_space::StateSpace;

/// `(action, from) → to`, each with probability 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionTable {
    states: usize,
    /// Row-major: `successors[action * states + from]`.
    successors: Vec<StateId>,
}

impl TransitionTable {
    /// Build the table.
    ///
    /// Each action starts as the identity and then rewrites only the
    /// block it acts on:
    ///
    /// - `Wait`: identity.
    /// - `Finish`: every `Question(q, c)` goes to `General(c)`.
    /// - `Ask(q)`: every `General(c)` goes to `Question(q, c)`.
    /// - `Classify(c)`: every `General(·)` goes to `Terminal(c)`.
    pub fn build(states: &StateSpace, actions: &ActionSpace) -> Self {
        let n = states.len();
        let mut successors = Vec::with_capacity(actions.len() * n);

        for (_, action) in actions.iter() {
            let start = successors.len();
            successors.extend((0..n as u32).map(StateId));
            let row = &mut successors[start..start + n];

            match action {
                Action::Wait => {}
                Action::Finish => {
                    for q in 0..states.question_count() {
                        for from in states.question_block(q.into()) {
                            let class = states.state(StateId(from as u32)).classification();
                            row[from] = states.id(State::General(class));
                        }
                    }
                }
                Action::Ask(q) => {
                    for from in states.general_block() {
                        let class = states.state(StateId(from as u32)).classification();
                        row[from] = states.id(State::Question(q, class));
                    }
                }
                Action::Classify(target) => {
                    let to = states.id(State::Terminal(target));
                    for from in states.general_block() {
                        row[from] = to;
                    }
                }
            }
        }

        Self {
            states: n,
            successors,
        }
    }

    /// The successor of `from` under `action`.
    pub fn successor(&self, action: ActionId, from: StateId) -> StateId {
        self.successors[action.index() * self.states + from.index()]
    }

    /// `P(to | from, action)`: 1 for the successor, 0 otherwise.
    pub fn probability(&self, action: ActionId, from: StateId, to: StateId) -> f64 {
        if self.successor(action, from) == to {
            1.0
        } else {
            0.0
        }
    }

    /// Number of `(action, from)` rows.
    pub fn len(&self) -> usize {
        self.successors.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.successors.is_empty()
    }

    /// Every nonzero entry as `(action, from, to, probability)`, in
    /// action-major then state order.
    pub fn iter(&self) -> impl Iterator<Item = (ActionId, StateId, StateId, f64)> + '_ {
        self.successors.iter().enumerate().map(move |(i, &to)| {
            let action = ActionId((i / self.states) as u32);
            let from = StateId((i % self.states) as u32);
            (action, from, to, 1.0)
        })
    }
}
