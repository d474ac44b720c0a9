use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;
use tracing::{info, instrument, warn};

use crate::errors::{QuizError, QuizResult};
use crate::models::{QuestionRecord, Session};

/// Starts a new quiz session
///
/// The questions are copied; the caller's list is left untouched.
///
/// ### Arguments
///
/// * `questions` - The question set in its source order
/// * `shuffle_questions` - Whether to present the questions in a random order
///
/// ### Returns
///
/// A fresh session with the cursor on the first question
///
/// ### Errors
///
/// Returns `QuizError::EmptyQuestionSet` if `questions` is empty
pub fn start(questions: &[QuestionRecord], shuffle_questions: bool) -> QuizResult<Session> {
    start_with_rng(questions, shuffle_questions, StdRng::from_rng(&mut rand::rng()))
}

/// Starts a new quiz session drawing all randomness from `rng`
///
/// The session keeps `rng` for its option shuffles, so a seeded generator
/// makes the whole session reproducible.
#[instrument(skip(questions, rng), fields(count = questions.len()))]
pub fn start_with_rng(
    questions: &[QuestionRecord],
    shuffle_questions: bool,
    rng: StdRng,
) -> QuizResult<Session> {
    open_session(questions.to_vec(), shuffle_questions, false, rng)
}

/// Starts a new session over a subset of a previous session's questions
///
/// The subset is taken from the previous session's source order, not its
/// presentation order. The previous session is consumed; the option
/// shuffling preference carries over.
///
/// ### Arguments
///
/// * `session` - The finished session
/// * `filter_positions` - Positions into the previous session's source order,
///   e.g. `ScoreReport::missed_positions`
/// * `shuffle_questions` - Whether to present the subset in a random order
///
/// ### Errors
///
/// Returns `QuizError::PositionOutOfRange` for a position outside the previous
/// question set, and `QuizError::EmptyQuestionSet` if no position is given
#[instrument(skip(session, filter_positions), fields(session_id = %session.get_id()))]
pub fn restart_filtered(
    session: Session,
    filter_positions: impl IntoIterator<Item = usize>,
    shuffle_questions: bool,
) -> QuizResult<Session> {
    let len = session.original_questions.len();
    let positions: BTreeSet<usize> = filter_positions.into_iter().collect();
    if let Some(&position) = positions.iter().find(|position| **position >= len) {
        warn!("Restart requested for position {} of {} questions", position, len);
        return Err(QuizError::PositionOutOfRange { position, len });
    }

    let subset: Vec<QuestionRecord> = positions
        .iter()
        .map(|position| session.original_questions[*position].clone())
        .collect();

    let Session {
        mut rng,
        shuffle_options_enabled,
        ..
    } = session;
    let rng = StdRng::from_rng(&mut rng);

    info!("Restarting with {} of {} questions", subset.len(), len);
    open_session(subset, shuffle_questions, shuffle_options_enabled, rng)
}

/// Starts a new session over the whole question set of a finished one
///
/// Every question comes back unanswered, in source order or a fresh random
/// order. Like [`restart_filtered`], the option shuffling preference carries
/// over and the new RNG is drawn from the previous session's.
pub fn restart(session: Session, shuffle_questions: bool) -> QuizResult<Session> {
    let len = session.original_questions.len();
    restart_filtered(session, 0..len, shuffle_questions)
}

fn open_session(
    questions: Vec<QuestionRecord>,
    shuffle_questions: bool,
    shuffle_options_enabled: bool,
    mut rng: StdRng,
) -> QuizResult<Session> {
    if questions.is_empty() {
        warn!("Refusing to start a quiz without questions");
        return Err(QuizError::EmptyQuestionSet);
    }

    let mut order: Vec<usize> = (0..questions.len()).collect();
    if shuffle_questions {
        order.shuffle(&mut rng);
    }

    let session = Session::new(questions, order, shuffle_options_enabled, rng);
    info!(
        session_id = %session.get_id(),
        shuffled = shuffle_questions,
        "Started quiz with {} questions",
        session.len()
    );
    Ok(session)
}
