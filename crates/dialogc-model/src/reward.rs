//! Immediate rewards per action and state.

use dialogc_core::{Action, ActionId, State, StateId};
use dialogc_spec::Rewards;

use crate::action_space::ActionSpace;
use crate::state_space::StateSpace;

/// Dense `|A| × |S|` reward matrix.
///
/// | action        | reward                                             |
/// |---------------|----------------------------------------------------|
/// | `Wait`        | `Wait` in every state                              |
/// | `Finish`      | `0` in every state                                 |
/// | `Ask(q)`      | `Question` in every state                          |
/// | `Classify(c)` | `Success` where the true class is `c`, `0` in terminal states, `Failure` elsewhere |
///
/// "True class is `c`" covers `General(c)` and every `Question(q, c)`.
#[derive(Clone, Debug, PartialEq)]
pub struct RewardMatrix {
    states: usize,
    /// Row-major: `values[action * states + state]`.
    values: Vec<f64>,
}

impl RewardMatrix {
    /// Build the matrix from the reward constants.
    pub fn build(states: &StateSpace, actions: &ActionSpace, rewards: Rewards) -> Self {
        let n = states.len();
        let mut values = vec![rewards.failure; actions.len() * n];

        for (aid, action) in actions.iter() {
            let row = &mut values[aid.index() * n..(aid.index() + 1) * n];
            match action {
                Action::Wait => row.fill(rewards.wait),
                Action::Finish => row.fill(0.0),
                Action::Ask(_) => row.fill(rewards.question),
                Action::Classify(target) => {
                    for (sid, state) in states.iter() {
                        row[sid.index()] = match state {
                            State::Terminal(_) => 0.0,
                            s if s.classification() == target => rewards.success,
                            _ => rewards.failure,
                        };
                    }
                }
            }
        }

        Self { states: n, values }
    }

    /// `R(action, state)`.
    pub fn get(&self, action: ActionId, state: StateId) -> f64 {
        self.values[action.index() * self.states + state.index()]
    }

    /// All rewards for `action`, in state order.
    pub fn row(&self, action: ActionId) -> &[f64] {
        let start = action.index() * self.states;
        &self.values[start..start + self.states]
    }

    /// Every nonzero entry as `(action, state, reward)`.
    pub fn iter(&self) -> impl Iterator<Item = (ActionId, StateId, f64)> + '_ {
        let n = self.states;
        self.values
            .iter()
            .enumerate()
            .filter(|&(_, &r)| r != 0.0)
            .map(move |(i, &r)| (ActionId((i / n) as u32), StateId((i % n) as u32), r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialogc_core::{ClassId, QuestionId};
    use proptest::prelude::*;

    const REWARDS: Rewards = Rewards {
        success: 10.0,
        failure: -30.0,
        question: -5.0,
        wait: -0.0001,
    };

    fn build(classes: u32, questions: u32) -> (StateSpace, ActionSpace, RewardMatrix) {
        let s = StateSpace::with_dims(classes, questions);
        let a = ActionSpace::with_dims(classes, questions);
        let r = RewardMatrix::build(&s, &a, REWARDS);
        (s, a, r)
    }

    #[test]
    fn reference_classify_yes_row() {
        let (_, a, r) = build(2, 1);
        let yes = a.id(Action::Classify(ClassId(0)));
        assert_eq!(r.row(yes), &[10.0, -30.0, 10.0, -30.0, 0.0, 0.0]);
    }

    #[test]
    fn control_rows() {
        let (_, a, r) = build(2, 1);
        assert!(r.row(a.id(Action::Wait)).iter().all(|&v| v == -0.0001));
        assert!(r.row(a.id(Action::Finish)).iter().all(|&v| v == 0.0));
        assert!(r
            .row(a.id(Action::Ask(QuestionId(0))))
            .iter()
            .all(|&v| v == -5.0));
    }

    #[test]
    fn iter_omits_finish_and_terminal_classify() {
        let (s, a, r) = build(2, 1);
        let finish = a.id(Action::Finish);
        assert!(r.iter().all(|(action, _, _)| action != finish));
        // wait + ask = 12 cells, each classify row has 4 nonzero cells.
        assert_eq!(r.iter().count(), 2 * s.len() + 2 * 4);
    }

    proptest! {
        #[test]
        fn classify_rewards_follow_true_class(classes in 1u32..6, questions in 0u32..4) {
            let (s, a, r) = build(classes, questions);
            for target in 0..classes {
                let aid = a.id(Action::Classify(ClassId(target)));
                for (sid, state) in s.iter() {
                    let expected = if state.is_terminal() {
                        0.0
                    } else if state.classification() == ClassId(target) {
                        REWARDS.success
                    } else {
                        REWARDS.failure
                    };
                    prop_assert_eq!(r.get(aid, sid), expected);
                }
            }
        }

        #[test]
        fn ask_rows_are_constant(classes in 1u32..6, questions in 1u32..4) {
            let (s, a, r) = build(classes, questions);
            for q in 0..questions {
                let aid = a.id(Action::Ask(QuestionId(q)));
                prop_assert!(r.row(aid).iter().all(|&v| v == REWARDS.question));
                prop_assert_eq!(r.row(aid).len(), s.len());
            }
        }
    }
}
