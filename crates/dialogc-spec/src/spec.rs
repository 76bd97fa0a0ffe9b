//! The validated, index-resolved model specification.

use dialogc_core::{ClassId, ObsId, QuestionId, State};
use indexmap::IndexMap;
use smallvec::SmallVec;

/// Reward constants for the four kinds of outcome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rewards {
    /// Reward for classifying correctly.
    pub success: f64,
    /// Reward for classifying incorrectly, and the default for every cell.
    pub failure: f64,
    /// Cost of asking a question. Always greater than `failure`.
    pub question: f64,
    /// Cost of waiting one step.
    pub wait: f64,
}

/// One classification's declared observation prior for a question.
///
/// A partial mapping: observations not listed carry zero mass before
/// normalisation.
pub type EffectRow = SmallVec<[(ObsId, f64); 4]>;

/// A question the agent may ask.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionSpec {
    pub(crate) label: crate::Label,
    pub(crate) description: String,
    pub(crate) effect: IndexMap<ClassId, EffectRow>,
}

impl QuestionSpec {
    /// The question label.
    pub fn label(&self) -> &crate::Label {
        &self.label
    }

    /// Human-readable wording (`English` in the document).
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The declared prior, keyed by classification in declaration order.
    ///
    /// Classifications absent from this map are given a uniform
    /// observation distribution by the noise compositor.
    pub fn effect(&self) -> &IndexMap<ClassId, EffectRow> {
        &self.effect
    }
}

/// An immutable, fully validated dialog specification.
///
/// Only [`SpecLoader`](crate::SpecLoader) constructs this type, so every
/// instance satisfies the validation invariants: labels are well formed
/// and unique, the discount is in `[0, 1]`, the question reward exceeds
/// the failure reward, and every effect table refers only to declared
/// classifications and observations.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelSpec {
    pub(crate) classifications: Vec<crate::Label>,
    pub(crate) observations: Vec<crate::Label>,
    pub(crate) questions: Vec<QuestionSpec>,
    pub(crate) rewards: Rewards,
    pub(crate) discount: f64,
}

impl ModelSpec {
    /// Classification labels in declaration order.
    pub fn classifications(&self) -> &[crate::Label] {
        &self.classifications
    }

    /// Observation labels in declaration order.
    pub fn observations(&self) -> &[crate::Label] {
        &self.observations
    }

    /// Questions in declaration order.
    pub fn questions(&self) -> &[QuestionSpec] {
        &self.questions
    }

    /// Reward constants.
    pub fn rewards(&self) -> Rewards {
        self.rewards
    }

    /// Time discount factor in `[0, 1]`.
    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// Number of classifications.
    pub fn class_count(&self) -> usize {
        self.classifications.len()
    }

    /// Number of observations.
    pub fn observation_count(&self) -> usize {
        self.observations.len()
    }

    /// Number of questions.
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Label of classification `c`.
    ///
    /// # Panics
    ///
    /// Panics if `c` is out of range.
    pub fn class_label(&self, c: ClassId) -> &crate::Label {
        &self.classifications[c.index()]
    }

    /// Label of observation `o`.
    ///
    /// # Panics
    ///
    /// Panics if `o` is out of range.
    pub fn observation_label(&self, o: ObsId) -> &crate::Label {
        &self.observations[o.index()]
    }

    /// The question with index `q`.
    ///
    /// # Panics
    ///
    /// Panics if `q` is out of range.
    pub fn question(&self, q: QuestionId) -> &QuestionSpec {
        &self.questions[q.index()]
    }

    /// Rendered label of `state`: `S_<c>`, `q_<q>_S_<c>` or `tS_<c>`.
    ///
    /// # Panics
    ///
    /// Panics if an index inside `state` is out of range.
    pub fn state_label(&self, state: State) -> String {
        match state {
            State::General(c) => format!("S_{}", self.class_label(c)),
            State::Question(q, c) => {
                format!("q_{}_S_{}", self.question(q).label(), self.class_label(c))
            }
            State::Terminal(c) => format!("tS_{}", self.class_label(c)),
        }
    }

    /// Iterate over question indices in declaration order.
    pub fn question_ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        (0..self.questions.len() as u32).map(QuestionId)
    }

    /// Iterate over classification indices in declaration order.
    pub fn class_ids(&self) -> impl Iterator<Item = ClassId> + '_ {
        (0..self.classifications.len() as u32).map(ClassId)
    }
}
