/// Data models module
///
/// This module defines the core data structures used throughout the engine:
/// the immutable question records supplied by the caller, the answers a user
/// records against them, the per-question option shuffle tables, and the
/// session that ties them together for one attempt at a question set.

// Re-export all model types
mod question;
pub use question::{AnswerKey, QuestionKind, QuestionRecord};

mod answer;
pub use answer::Answer;

mod shuffle_map;
pub use shuffle_map::ShuffleMap;

mod outcome;
pub use outcome::{
    AdvanceOutcome, AdvanceTicket, BlockReason, CorrectDisplay, EvaluationResult, PendingAdvance,
    QuestionState, ScoreReport,
};

mod session;
pub use session::Session;
