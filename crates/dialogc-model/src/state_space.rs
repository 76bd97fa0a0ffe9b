//! Enumeration of belief states.

use std::ops::Range;

use dialogc_core::{ClassId, QuestionId, State, StateId};
use dialogc_spec::ModelSpec;

/// The enumerated state space.
///
/// `|C| × (2 + |Q|)` states in a fixed block order: the general block,
/// one block per question in declaration order, then the terminal
/// block. Within each block states follow classification order.
///
/// # Examples
///
/// ```
/// use dialogc_core::{ClassId, QuestionId, State, StateId};
/// use dialogc_model::StateSpace;
///
/// let space = StateSpace::with_dims(3, 2);
/// assert_eq!(space.len(), 12);
/// assert_eq!(space.id(State::General(ClassId(2))), StateId(2));
/// assert_eq!(space.id(State::Question(QuestionId(1), ClassId(0))), StateId(6));
/// assert_eq!(space.id(State::Terminal(ClassId(0))), StateId(9));
/// assert_eq!(space.state(StateId(4)), State::Question(QuestionId(0), ClassId(1)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateSpace {
    classes: u32,
    questions: u32,
}

impl StateSpace {
    /// The state space for `spec`.
    pub fn new(spec: &ModelSpec) -> Self {
        Self::with_dims(spec.class_count() as u32, spec.question_count() as u32)
    }

    /// A state space for `classes` classifications and `questions` questions.
    pub fn with_dims(classes: u32, questions: u32) -> Self {
        Self { classes, questions }
    }

    /// Number of classifications.
    pub fn class_count(&self) -> u32 {
        self.classes
    }

    /// Number of questions.
    pub fn question_count(&self) -> u32 {
        self.questions
    }

    /// Total number of states.
    pub fn len(&self) -> usize {
        self.classes as usize * (2 + self.questions as usize)
    }

    /// Whether the space has no states (only when there are no classifications).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index range of the general block.
    pub fn general_block(&self) -> Range<usize> {
        0..self.classes as usize
    }

    /// Index range of question `q`'s block.
    pub fn question_block(&self, q: QuestionId) -> Range<usize> {
        let c = self.classes as usize;
        let start = (1 + q.index()) * c;
        start..start + c
    }

    /// Index range of the terminal block.
    pub fn terminal_block(&self) -> Range<usize> {
        let c = self.classes as usize;
        let start = (1 + self.questions as usize) * c;
        start..start + c
    }

    /// Position of `state`.
    pub fn id(&self, state: State) -> StateId {
        let c = self.classes;
        let index = match state {
            State::General(class) => class.0,
            State::Question(q, class) => (1 + q.0) * c + class.0,
            State::Terminal(class) => (1 + self.questions) * c + class.0,
        };
        StateId(index)
    }

    /// The state at position `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    pub fn state(&self, id: StateId) -> State {
        assert!(
            id.index() < self.len(),
            "state id {id} out of range for {} states",
            self.len()
        );
        let block = id.0 / self.classes;
        let class = ClassId(id.0 % self.classes);
        if block == 0 {
            State::General(class)
        } else if block <= self.questions {
            State::Question(QuestionId(block - 1), class)
        } else {
            State::Terminal(class)
        }
    }

    /// All states in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (StateId, State)> + '_ {
        (0..self.len() as u32).map(move |i| (StateId(i), self.state(StateId(i))))
    }
}
