use tracing::{info, instrument};

use super::grade;
use crate::models::{ScoreReport, Session};

/// Tallies the session
///
/// Walks the questions in presentation order, moves each recorded answer back
/// into original space through the question's shuffle (if one was drawn) and
/// grades it exactly as evaluation does. Questions that were never answered
/// or evaluated are graded too: unscorable ones count as correct, the rest as
/// missed.
#[instrument(skip(session), fields(session_id = %session.get_id()))]
pub fn score(session: &Session) -> ScoreReport {
    let mut correct_count = 0;
    let mut missed_questions = Vec::new();
    let mut missed_positions = Vec::new();

    for (position, question) in session.active_questions.iter().enumerate() {
        let answer = session.answers[position]
            .as_ref()
            .map(|answer| match session.option_shuffles.get(&position) {
                Some(map) => map.answer_to_original(answer),
                None => answer.clone(),
            });

        if grade(question, answer.as_ref()) {
            correct_count += 1;
        } else {
            missed_questions.push(question.clone());
            missed_positions.push(session.active_to_original[position]);
        }
    }

    let total = session.len();
    let incorrect_count = total - correct_count;
    let accuracy_percent = if total == 0 {
        0
    } else {
        (100.0 * correct_count as f64 / total as f64).round() as u32
    };

    info!(
        correct = correct_count,
        incorrect = incorrect_count,
        "Scored quiz: {}%",
        accuracy_percent
    );

    ScoreReport {
        correct_count,
        incorrect_count,
        total,
        accuracy_percent,
        missed_questions,
        missed_positions,
    }
}
