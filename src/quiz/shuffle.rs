use tracing::{debug, info, instrument};

use crate::errors::QuizResult;
use crate::models::{Session, ShuffleMap};

/// Returns the option order to present for the question at `position`
///
/// With option shuffling disabled, or for a question without options, this
/// is the identity map, rebuilt on every call and never cached. Otherwise the
/// question's shuffle is drawn on first access and reused for the rest of
/// the session.
///
/// When a shuffle is drawn for a question that already holds an answer, that
/// answer was recorded under the identity order and is rewritten into the new
/// shuffled space.
///
/// ### Errors
///
/// Returns `QuizError::PositionOutOfRange` if `position` is not a question of the session
#[instrument(skip(session), fields(session_id = %session.get_id()))]
pub fn get_or_create_shuffle_map(session: &mut Session, position: usize) -> QuizResult<ShuffleMap> {
    let question = session.checked_question(position)?;
    if !session.shuffle_options_enabled || !question.has_options() {
        return Ok(ShuffleMap::identity(question));
    }

    if let Some(map) = session.option_shuffles.get(&position) {
        return Ok(map.clone());
    }

    let map = ShuffleMap::random(&session.active_questions[position], &mut session.rng);
    if let Some(answer) = session.answers[position].take() {
        debug!("Moving recorded answer into the new option order");
        session.answers[position] = Some(map.answer_to_shuffled(&answer));
    }
    debug!(order = ?map.get_shuffled_to_original(), "Shuffled options");
    session.option_shuffles.insert(position, map.clone());
    Ok(map)
}

/// Turns option shuffling on or off
///
/// Any change drops every cached shuffle. Turning shuffling off first moves
/// each recorded choice back into original space so it keeps meaning the same
/// options under the identity order. Setting the current value is a no-op.
#[instrument(skip(session), fields(session_id = %session.get_id()))]
pub fn set_shuffle_options_enabled(session: &mut Session, enabled: bool) {
    if session.shuffle_options_enabled == enabled {
        return;
    }
    session.cancel_pending_advance();

    if !enabled {
        for (position, map) in session.option_shuffles.iter() {
            if let Some(answer) = session.answers[*position].as_mut() {
                *answer = map.answer_to_original(answer);
            }
        }
    }

    session.option_shuffles.clear();
    session.shuffle_options_enabled = enabled;
    info!("Option shuffling {}", if enabled { "enabled" } else { "disabled" });
}
