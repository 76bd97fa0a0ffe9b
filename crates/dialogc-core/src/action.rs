//! Tagged action identities.

use crate::id::{ClassId, QuestionId};

/// A POMDP action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Keep collecting observations without changing phase.
    Wait,
    /// Stop listening to the current question and return to the general block.
    Finish,
    /// Ask question `q`.
    Ask(QuestionId),
    /// Commit to classification `c`, ending the dialog.
    Classify(ClassId),
}
