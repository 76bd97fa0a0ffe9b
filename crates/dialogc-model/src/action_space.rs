//! Enumeration of actions.

use dialogc_core::{Action, ActionId, ClassId, QuestionId};
use dialogc_spec::ModelSpec;

/// The enumerated action space.
///
/// `2 + |Q| + |C|` actions: `Wait`, `Finish`, one `Ask` per question in
/// declaration order, then one `Classify` per classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionSpace {
    classes: u32,
    questions: u32,
}

impl ActionSpace {
    /// The action space for `spec`.
    pub fn new(spec: &ModelSpec) -> Self {
        Self::with_dims(spec.class_count() as u32, spec.question_count() as u32)
    }

    /// An action space for `classes` classifications and `questions` questions.
    pub fn with_dims(classes: u32, questions: u32) -> Self {
        Self { classes, questions }
    }

    /// Total number of actions.
    pub fn len(&self) -> usize {
        2 + self.questions as usize + self.classes as usize
    }

    /// Always `false`: the control actions are always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Position of `action`.
    pub fn id(&self, action: Action) -> ActionId {
        let index = match action {
            Action::Wait => 0,
            Action::Finish => 1,
            Action::Ask(q) => 2 + q.0,
            Action::Classify(c) => 2 + self.questions + c.0,
        };
        ActionId(index)
    }

    /// The action at position `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    pub fn action(&self, id: ActionId) -> Action {
        assert!(
            id.index() < self.len(),
            "action id {id} out of range for {} actions",
            self.len()
        );
        match id.0 {
            0 => Action::Wait,
            1 => Action::Finish,
            i if i < 2 + self.questions => Action::Ask(QuestionId(i - 2)),
            i => Action::Classify(ClassId(i - 2 - self.questions)),
        }
    }

    /// All actions in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (ActionId, Action)> + '_ {
        (0..self.len() as u32).map(move |i| (ActionId(i), self.action(ActionId(i))))
    }
}
