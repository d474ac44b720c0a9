//! Quizmaster: a quiz session engine
//!
//! This library runs a quiz over a question set: it tracks the answer to
//! every question, grades single-choice, multiple-choice and free-text
//! questions, shuffles question and option order reversibly, and produces
//! a final score report. It renders nothing itself; a front end drives a
//! [`models::Session`] through the operations in [`quiz`].
//!
//! ### Modules
//!
//! - `models`: Questions, answers, shuffle maps and the session state
//! - `quiz`: Engine operations over a session
//! - `dto`: JSON wire format of question sets
//! - `source`: Loading question sets from files and URLs
//! - `config`: Layered configuration
//! - `logging`: Tracing subscriber setup
//! - `errors`: Engine error type

/// Layered configuration module
pub mod config;

/// Wire format module
pub mod dto;

/// Engine error module
pub mod errors;

/// Tracing setup module
pub mod logging;

/// Data models module
pub mod models;

/// Quiz engine module
pub mod quiz;

/// Question set loading module
pub mod source;

#[cfg(test)]
pub mod test_utils;

pub use errors::{QuizError, QuizResult};
