use tracing::{debug, instrument};

use super::get_or_create_shuffle_map;
use crate::errors::{QuizError, QuizResult};
use crate::models::{
    Answer, AnswerKey, CorrectDisplay, EvaluationResult, QuestionKind, QuestionRecord,
    QuestionState, Session, ShuffleMap,
};

/// Evaluates and locks the question at `position`
///
/// On a question that is already evaluated this is a pure query: it returns
/// the same result again and changes nothing, not even the shuffle cache.
///
/// ### Returns
///
/// Whether the recorded answer is correct, and what to show as the correct
/// answer in the order currently presented
///
/// ### Errors
///
/// Returns an error if:
/// - `position` is out of range
/// - a choice question with options has no recorded answer
///   (`QuizError::NoAnswerSelected`, the question stays unlocked)
#[instrument(skip(session), fields(session_id = %session.get_id()))]
pub fn evaluate(session: &mut Session, position: usize) -> QuizResult<EvaluationResult> {
    session.checked_question(position)?;
    if session.evaluated[position] {
        let question = &session.active_questions[position];
        let map = match session.option_shuffles.get(&position) {
            Some(map) => map.clone(),
            None => ShuffleMap::identity(question),
        };
        return Ok(build_result(question, &map, session.answers[position].as_ref()));
    }

    let map = get_or_create_shuffle_map(session, position)?;
    let question = &session.active_questions[position];
    let answer = session.answers[position].as_ref();

    if answer.is_none() && requires_answer(question) {
        debug!("Evaluation blocked, nothing selected");
        return Err(QuizError::NoAnswerSelected { position });
    }

    let result = build_result(question, &map, answer);
    session.evaluated[position] = true;
    session.cancel_pending_advance();
    debug!(correct = result.correct, scorable = result.scorable, "Evaluated question");
    Ok(result)
}

/// Reports where the question at `position` is in its lifecycle
pub fn question_state(session: &Session, position: usize) -> QuizResult<QuestionState> {
    session.checked_question(position)?;
    let state = if session.evaluated[position] {
        QuestionState::Evaluated
    } else if session.answers[position].is_some() {
        QuestionState::Answered
    } else {
        QuestionState::Unanswered
    };
    Ok(state)
}

/// Grades an original-space answer against a question's key
///
/// This is the single source of truth for correctness, shared by evaluation
/// and scoring. Unscorable questions are always correct; a missing answer to
/// a scorable question never is.
pub fn grade(question: &QuestionRecord, answer: Option<&Answer>) -> bool {
    if !question.is_scorable() {
        return true;
    }

    match (question.get_key(), answer) {
        (AnswerKey::SingleChoice { correct_index: Some(correct) }, Some(Answer::Choice(picked))) => {
            picked == correct
        }
        (AnswerKey::MultipleChoice { correct_indices }, Some(Answer::Choices(picked))) => {
            picked == correct_indices
        }
        (AnswerKey::FreeText { correct_text: Some(expected) }, Some(Answer::Text(typed))) => {
            normalize_text(typed) == normalize_text(expected)
        }
        _ => false,
    }
}

/// Trims surrounding whitespace and lowercases
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Choice questions with options need a selection before they can be locked
fn requires_answer(question: &QuestionRecord) -> bool {
    question.get_kind() != QuestionKind::FreeText && question.has_options()
}

fn build_result(question: &QuestionRecord, map: &ShuffleMap, answer: Option<&Answer>) -> EvaluationResult {
    let original_answer = answer.map(|answer| map.answer_to_original(answer));
    let scorable = question.is_scorable();

    EvaluationResult {
        correct: grade(question, original_answer.as_ref()),
        scorable,
        correct_display: correct_display(question, map, scorable),
    }
}

fn correct_display(question: &QuestionRecord, map: &ShuffleMap, scorable: bool) -> CorrectDisplay {
    if !scorable {
        return CorrectDisplay::Unavailable;
    }

    match question.get_kind() {
        QuestionKind::SingleChoice => match map.get_shuffled_correct_index() {
            Some(position) => CorrectDisplay::Option {
                position,
                text: map.get_shuffled_options()[position].clone(),
            },
            None => CorrectDisplay::Unavailable,
        },
        QuestionKind::MultipleChoice => CorrectDisplay::Options {
            positions: map.get_shuffled_correct_indices().iter().copied().collect(),
        },
        QuestionKind::FreeText => CorrectDisplay::Text {
            text: question.get_correct_text().unwrap_or_default().to_string(),
        },
    }
}
