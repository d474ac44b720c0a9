use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

use super::evaluate;
use crate::errors::{QuizError, QuizResult};
use crate::models::{
    AdvanceOutcome, AdvanceTicket, BlockReason, PendingAdvance, QuestionKind, Session,
};

/// Moves the cursor past the current question
///
/// An unevaluated multiple-choice or free-text question is evaluated first;
/// a multiple-choice question with nothing selected blocks the move. An
/// unanswered single-choice question is skipped without being locked.
/// Leaving the last question completes the quiz.
#[instrument(skip(session), fields(session_id = %session.get_id()))]
pub fn advance(session: &mut Session) -> QuizResult<AdvanceOutcome> {
    session.cancel_pending_advance();

    let position = session.current_index;
    let len = session.len();
    if position >= len {
        return Ok(AdvanceOutcome::QuizComplete);
    }

    let kind = session.active_questions[position].get_kind();
    if !session.evaluated[position] && kind != QuestionKind::SingleChoice {
        match evaluate(session, position) {
            Ok(_) => {}
            Err(QuizError::NoAnswerSelected { .. }) => {
                return Ok(AdvanceOutcome::Blocked(BlockReason::NoAnswerSelected));
            }
            Err(err) => return Err(err),
        }
    }

    session.current_index = position + 1;
    if session.current_index >= len {
        info!("Reached the end of the quiz");
        Ok(AdvanceOutcome::QuizComplete)
    } else {
        debug!(to = session.current_index, "Moved to next question");
        Ok(AdvanceOutcome::MovedTo(session.current_index))
    }
}

/// Moves the cursor back one question
///
/// Does nothing on the first question. From the completed state it returns
/// to the last question.
///
/// ### Returns
///
/// The cursor position after the move
#[instrument(skip(session), fields(session_id = %session.get_id()))]
pub fn go_back(session: &mut Session) -> usize {
    session.cancel_pending_advance();
    if session.current_index > 0 {
        session.current_index = session.current_index.min(session.len()) - 1;
        debug!(to = session.current_index, "Moved to previous question");
    }
    session.current_index
}

/// Schedules an automatic `advance` after `delay`
///
/// A session has at most one pending auto-advance: scheduling replaces the
/// previous one. Recording, evaluating, navigating and toggling option
/// shuffling all cancel it.
///
/// ### Returns
///
/// The ticket to hand to [`fire_auto_advance`] once the delay has passed
pub fn schedule_auto_advance(session: &mut Session, delay: Duration) -> AdvanceTicket {
    if let Some(previous) = session.pending_advance.take() {
        debug!(ticket = %previous.ticket, "Replacing pending auto-advance");
    }

    session.ticket_counter += 1;
    let ticket = AdvanceTicket(session.ticket_counter);
    session.pending_advance = Some(PendingAdvance {
        ticket,
        position: session.current_index,
        due_at: Instant::now() + delay,
    });
    debug!(%ticket, ?delay, "Scheduled auto-advance");
    ticket
}

/// Cancels the pending auto-advance, returning whether there was one
pub fn cancel_auto_advance(session: &mut Session) -> bool {
    session.cancel_pending_advance()
}

/// The pending auto-advance, if any
pub fn pending_auto_advance(session: &Session) -> Option<&PendingAdvance> {
    session.pending_advance.as_ref()
}

/// Runs a scheduled auto-advance
///
/// Stale tickets (cancelled, replaced, or scheduled on a question the cursor
/// has since left) do nothing and return `None`.
#[instrument(skip(session), fields(session_id = %session.get_id()))]
pub fn fire_auto_advance(
    session: &mut Session,
    ticket: AdvanceTicket,
) -> QuizResult<Option<AdvanceOutcome>> {
    match session.pending_advance {
        Some(pending) if pending.ticket == ticket && pending.position == session.current_index => {
            session.pending_advance = None;
            advance(session).map(Some)
        }
        _ => {
            debug!(%ticket, "Ignoring stale auto-advance");
            Ok(None)
        }
    }
}
