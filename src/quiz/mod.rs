//! Quiz engine module
//!
//! This module provides the operations a caller (a terminal front end, a
//! GUI, a bot) drives a quiz session with. Every operation takes the
//! caller-owned [`Session`](crate::models::Session) explicitly and runs to
//! completion synchronously.
//!
//! - `lifecycle`: starting a session and restarting over a subset
//! - `shuffle`: per-question option shuffling and its index tables
//! - `recorder`: storing answers
//! - `evaluator`: grading and locking questions
//! - `navigation`: moving the cursor, including the scheduled auto-advance
//! - `scorer`: the end-of-quiz tally

mod lifecycle;
mod shuffle;
mod recorder;
mod evaluator;
mod navigation;
mod scorer;

// Re-export all engine operations
pub use lifecycle::*;
pub use shuffle::*;
pub use recorder::*;
pub use evaluator::*;
pub use navigation::*;
pub use scorer::*;
