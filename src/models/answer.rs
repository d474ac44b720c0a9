use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A user's recorded answer to one question
///
/// Choice indices are stored in whatever index space was presented when they
/// were recorded (shuffled space while option shuffling is active).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Answer {
    /// The picked option of a single-choice question
    Choice(usize),
    /// The toggled-on options of a multiple-choice question (never empty)
    Choices(BTreeSet<usize>),
    /// Raw text of a free-text question, stored verbatim
    Text(String),
}

impl Answer {
    /// Rewrites every option index through `table`
    ///
    /// Indices outside the table are kept as they are; text answers are
    /// returned unchanged.
    pub fn translate(&self, table: &[usize]) -> Answer {
        let lookup = |index: usize| table.get(index).copied().unwrap_or(index);
        match self {
            Answer::Choice(index) => Answer::Choice(lookup(*index)),
            Answer::Choices(indices) => {
                Answer::Choices(indices.iter().map(|index| lookup(*index)).collect())
            }
            Answer::Text(text) => Answer::Text(text.clone()),
        }
    }

    /// Whether `index` is selected by this answer
    pub fn selects(&self, index: usize) -> bool {
        match self {
            Answer::Choice(choice) => *choice == index,
            Answer::Choices(indices) => indices.contains(&index),
            Answer::Text(_) => false,
        }
    }
}
