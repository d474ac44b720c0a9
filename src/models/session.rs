use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use std::collections::HashMap;
use uuid::Uuid;

use super::{Answer, PendingAdvance, QuestionRecord, ShuffleMap};
use crate::errors::{QuizError, QuizResult};

/// One attempt at a question set, from start to score
///
/// A session is created by [`crate::quiz::start`] and owned by its caller;
/// it holds no reference to any rendering surface. All per-question state is
/// keyed by position in `active_questions`.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique identifier used in logs and reports
    pub(crate) id: Uuid,

    /// When the session was started
    pub(crate) started_at: DateTime<Utc>,

    /// The question set in its source order
    pub(crate) original_questions: Vec<QuestionRecord>,

    /// The question set in presentation order
    pub(crate) active_questions: Vec<QuestionRecord>,

    /// `active_to_original[position]` is the source position of an active question
    pub(crate) active_to_original: Vec<usize>,

    /// Cursor into `active_questions`; equals its length once the quiz is complete
    pub(crate) current_index: usize,

    pub(crate) answers: Vec<Option<Answer>>,

    /// Monotonic within the session
    pub(crate) evaluated: Vec<bool>,

    /// Populated lazily, only while option shuffling is enabled
    pub(crate) option_shuffles: HashMap<usize, ShuffleMap>,

    pub(crate) shuffle_options_enabled: bool,

    pub(crate) pending_advance: Option<PendingAdvance>,

    /// Last auto-advance ticket handed out
    pub(crate) ticket_counter: u64,

    pub(crate) rng: StdRng,
}

impl Session {
    pub(crate) fn new(
        original_questions: Vec<QuestionRecord>,
        active_to_original: Vec<usize>,
        shuffle_options_enabled: bool,
        rng: StdRng,
    ) -> Self {
        let active_questions: Vec<QuestionRecord> = active_to_original
            .iter()
            .map(|original| original_questions[*original].clone())
            .collect();
        let count = active_questions.len();

        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            original_questions,
            active_questions,
            active_to_original,
            current_index: 0,
            answers: vec![None; count],
            evaluated: vec![false; count],
            option_shuffles: HashMap::new(),
            shuffle_options_enabled,
            pending_advance: None,
            ticket_counter: 0,
            rng,
        }
    }

    pub fn get_id(&self) -> Uuid {
        self.id
    }

    pub fn get_started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn get_active_questions(&self) -> &[QuestionRecord] {
        &self.active_questions
    }

    pub fn get_original_questions(&self) -> &[QuestionRecord] {
        &self.original_questions
    }

    /// Source position of the question presented at `position`
    pub fn original_position(&self, position: usize) -> Option<usize> {
        self.active_to_original.get(position).copied()
    }

    pub fn get_current_index(&self) -> usize {
        self.current_index
    }

    /// Number of questions in the session
    pub fn len(&self) -> usize {
        self.active_questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active_questions.is_empty()
    }

    /// Whether the cursor has moved past the last question
    pub fn is_complete(&self) -> bool {
        self.current_index >= self.active_questions.len()
    }

    /// The question under the cursor, or `None` once the quiz is complete
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.active_questions.get(self.current_index)
    }

    pub fn question(&self, position: usize) -> Option<&QuestionRecord> {
        self.active_questions.get(position)
    }

    /// The recorded answer at `position`, in the index space currently presented
    pub fn answer(&self, position: usize) -> Option<&Answer> {
        self.answers.get(position).and_then(Option::as_ref)
    }

    pub fn is_evaluated(&self, position: usize) -> bool {
        self.evaluated.get(position).copied().unwrap_or(false)
    }

    pub fn is_shuffle_options_enabled(&self) -> bool {
        self.shuffle_options_enabled
    }

    /// The cached shuffle map at `position`, if one has been created
    pub fn cached_shuffle_map(&self, position: usize) -> Option<&ShuffleMap> {
        self.option_shuffles.get(&position)
    }

    /// Checks `position` against the session and returns its question
    pub(crate) fn checked_question(&self, position: usize) -> QuizResult<&QuestionRecord> {
        self.active_questions
            .get(position)
            .ok_or(QuizError::PositionOutOfRange {
                position,
                len: self.active_questions.len(),
            })
    }

    /// Clears the pending auto-advance, returning whether there was one
    pub(crate) fn cancel_pending_advance(&mut self) -> bool {
        self.pending_advance.take().is_some()
    }
}
