//! Tagged belief-state identities.

use crate::id::{ClassId, QuestionId};

/// A POMDP state.
///
/// Every state pairs a true classification with the dialog phase the
/// agent is in: idle (general), awaiting the answer to a question, or
/// finished after committing to a classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum State {
    /// No question is being asked; the true classification is `c`.
    General(ClassId),
    /// Question `q` is awaiting observations; the true classification is `c`.
    Question(QuestionId, ClassId),
    /// A classification action has been taken; the episode is over.
    Terminal(ClassId),
}

impl State {
    /// The classification carried by this state.
    pub fn classification(self) -> ClassId {
        match self {
            Self::General(c) | Self::Question(_, c) | Self::Terminal(c) => c,
        }
    }

    /// Whether this is a `General` state.
    pub fn is_general(self) -> bool {
        matches!(self, Self::General(_))
    }

    /// Whether this is a `Terminal` state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Terminal(_))
    }

    /// The question this state belongs to, if it is a `Question` state.
    pub fn question(self) -> Option<QuestionId> {
        match self {
            Self::Question(q, _) => Some(q),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_carried_by_every_variant() {
        let c = ClassId(3);
        assert_eq!(State::General(c).classification(), c);
        assert_eq!(State::Question(QuestionId(1), c).classification(), c);
        assert_eq!(State::Terminal(c).classification(), c);
    }

    #[test]
    fn predicates() {
        let s = State::Question(QuestionId(2), ClassId(0));
        assert!(!s.is_general());
        assert!(!s.is_terminal());
        assert_eq!(s.question(), Some(QuestionId(2)));
        assert!(State::General(ClassId(0)).is_general());
        assert!(State::Terminal(ClassId(0)).is_terminal());
        assert_eq!(State::Terminal(ClassId(0)).question(), None);
    }
}
