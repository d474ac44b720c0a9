use thiserror::Error;

use crate::models::QuestionKind;

/// Errors raised by quiz engine operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("Question set is empty")]
    EmptyQuestionSet,
    #[error("Question {position} is already evaluated and cannot be changed")]
    InvalidQuestionState { position: usize },
    #[error("No answer selected for question {position}")]
    NoAnswerSelected { position: usize },
    #[error("Question position {position} is out of range (session has {len} questions)")]
    PositionOutOfRange { position: usize, len: usize },
    #[error("Option {option} is out of range for question {position} ({count} options)")]
    OptionOutOfRange {
        position: usize,
        option: usize,
        count: usize,
    },
    #[error("Question {position} is a {actual} question, not a {expected} question")]
    KindMismatch {
        position: usize,
        expected: QuestionKind,
        actual: QuestionKind,
    },
}

impl QuizError {
    /// Whether the caller can simply keep the user on the current question
    ///
    /// Everything else is a caller/programmer error that should be surfaced.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, QuizError::NoAnswerSelected { .. })
    }
}

/// Result type for engine operations
pub type QuizResult<T> = Result<T, QuizError>;
