use std::collections::BTreeSet;
use tracing::{debug, instrument, warn};

use super::{evaluate, get_or_create_shuffle_map};
use crate::errors::{QuizError, QuizResult};
use crate::models::{Answer, EvaluationResult, QuestionKind, Session};

/// Records the picked option of a single-choice question and evaluates it
///
/// Single-choice questions have no separate submit step: the first pick
/// locks the question.
///
/// ### Arguments
///
/// * `session` - The session being played
/// * `position` - The question's position in presentation order
/// * `option_index` - The picked option, in the order currently presented
///
/// ### Returns
///
/// The evaluation of the pick
///
/// ### Errors
///
/// Returns an error if:
/// - `position` is out of range
/// - the question is not single-choice
/// - the question is already evaluated
/// - `option_index` is not one of the question's options
#[instrument(skip(session), fields(session_id = %session.get_id()))]
pub fn record_choice(
    session: &mut Session,
    position: usize,
    option_index: usize,
) -> QuizResult<EvaluationResult> {
    check_recordable(session, position, QuestionKind::SingleChoice, Some(option_index))?;
    session.cancel_pending_advance();

    // The index is only meaningful in the order the options are shown in
    get_or_create_shuffle_map(session, position)?;
    session.answers[position] = Some(Answer::Choice(option_index));
    debug!("Recorded choice");

    evaluate(session, position)
}

/// Toggles one option of a multiple-choice question
///
/// Deselecting the last selected option clears the answer entirely, so "no
/// answer" and "everything deselected" are the same state.
///
/// ### Returns
///
/// The selection after the toggle, in the order currently presented
#[instrument(skip(session), fields(session_id = %session.get_id()))]
pub fn toggle_choice(
    session: &mut Session,
    position: usize,
    option_index: usize,
) -> QuizResult<BTreeSet<usize>> {
    check_recordable(session, position, QuestionKind::MultipleChoice, Some(option_index))?;
    session.cancel_pending_advance();
    get_or_create_shuffle_map(session, position)?;

    let mut selection = match session.answers[position].take() {
        Some(Answer::Choices(selection)) => selection,
        _ => BTreeSet::new(),
    };
    if !selection.remove(&option_index) {
        selection.insert(option_index);
    }
    debug!(?selection, "Toggled choice");

    session.answers[position] = (!selection.is_empty()).then(|| Answer::Choices(selection.clone()));
    Ok(selection)
}

/// Stores the typed answer of a free-text question verbatim
///
/// Normalization happens at evaluation time, so whitespace and case are kept.
#[instrument(skip(session, text), fields(session_id = %session.get_id()))]
pub fn record_text(session: &mut Session, position: usize, text: &str) -> QuizResult<()> {
    check_recordable(session, position, QuestionKind::FreeText, None)?;
    session.cancel_pending_advance();
    session.answers[position] = Some(Answer::Text(text.to_string()));
    debug!(len = text.len(), "Recorded text");
    Ok(())
}

/// Rejects recording against the wrong kind, a locked question, or a missing option
fn check_recordable(
    session: &Session,
    position: usize,
    expected: QuestionKind,
    option_index: Option<usize>,
) -> QuizResult<()> {
    let question = session.checked_question(position)?;

    let actual = question.get_kind();
    if actual != expected {
        return Err(QuizError::KindMismatch {
            position,
            expected,
            actual,
        });
    }

    if session.evaluated[position] {
        warn!(position, "Attempt to change a locked question");
        return Err(QuizError::InvalidQuestionState { position });
    }

    if let Some(option) = option_index {
        let count = question.get_options().len();
        if option >= count {
            return Err(QuizError::OptionOutOfRange {
                position,
                option,
                count,
            });
        }
    }

    Ok(())
}
