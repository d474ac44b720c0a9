use serde::Serialize;
use std::fmt;
use std::time::Instant;

use super::QuestionRecord;

/// Lifecycle of one question within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionState {
    Unanswered,
    Answered,
    /// Locked: the answer can no longer change
    Evaluated,
}

/// What the caller should show as "the right answer"
///
/// Option positions are in the space currently presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CorrectDisplay {
    Option { position: usize, text: String },
    Options { positions: Vec<usize> },
    Text { text: String },
    /// The question cannot be auto-graded
    Unavailable,
}

/// Outcome of evaluating one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationResult {
    pub correct: bool,
    /// False for questions that are counted correct because they cannot be graded
    pub scorable: bool,
    pub correct_display: CorrectDisplay,
}

/// Why `advance` refused to move on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    NoAnswerSelected,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::NoAnswerSelected => f.write_str("no answer selected"),
        }
    }
}

/// Result of an `advance` request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum AdvanceOutcome {
    MovedTo(usize),
    Blocked(BlockReason),
    QuizComplete,
}

/// Handle of a scheduled auto-advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdvanceTicket(pub(crate) u64);

impl fmt::Display for AdvanceTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The one auto-advance a session may have pending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    pub ticket: AdvanceTicket,
    /// The question the cursor was on when the advance was scheduled
    pub position: usize,
    pub due_at: Instant,
}

/// Final tally of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub total: usize,
    pub accuracy_percent: u32,
    /// Missed questions in presentation order
    pub missed_questions: Vec<QuestionRecord>,
    /// Positions of the missed questions in the session's original order
    pub missed_positions: Vec<usize>,
}

impl ScoreReport {
    pub fn is_perfect(&self) -> bool {
        self.incorrect_count == 0
    }
}
