//! Common test utilities for Quizmaster integration tests
//!
//! This file contains the sample question set shared by the integration
//! tests and helpers for writing it to disk.

#![allow(dead_code)]

use quizmaster::models::QuestionRecord;
use quizmaster::source::parse_questions;
use std::path::PathBuf;
use tempfile::TempDir;

/// A question set with one question of every kind
///
/// - single choice A/B/C, correct B
/// - multiple choice 2/4/5, correct 2 and 5
/// - free text, correct " Paris "
pub const SAMPLE_QUESTIONS: &str = r#"[
    {
        "type": "single",
        "question": "Pick B",
        "options": ["A", "B", "C"],
        "correctAnswerIndex": 1
    },
    {
        "question": "Pick the primes",
        "options": ["2", "4", "5"],
        "correctAnswerIndices": [0, 2]
    },
    {
        "type": "fill_in_blank",
        "question": "Capital of France?",
        "correctAnswer": " Paris "
    }
]"#;

/// Parses the sample question set
pub fn sample_questions() -> Vec<QuestionRecord> {
    parse_questions(SAMPLE_QUESTIONS).unwrap()
}

/// Writes `content` to `quiz.json` in a fresh temporary directory
///
/// ### Returns
///
/// The directory (which must be kept alive) and the file path
pub fn write_question_file(content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quiz.json");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}
