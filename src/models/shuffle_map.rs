use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::BTreeSet;

use super::{Answer, QuestionRecord};

/// Presentation order of one question's options
///
/// Holds the shuffled option texts plus both directions of the index
/// permutation, and the question's correct answer translated into shuffled
/// space. `original_to_shuffled` and `shuffled_to_original` are always exact
/// inverses of each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShuffleMap {
    /// The options in presentation order
    shuffled_options: Vec<String>,

    /// `original_to_shuffled[original] == shuffled`
    original_to_shuffled: Vec<usize>,

    /// `shuffled_to_original[shuffled] == original`
    shuffled_to_original: Vec<usize>,

    /// The single-choice key in shuffled space, if the key is valid
    shuffled_correct_index: Option<usize>,

    /// The multiple-choice key in shuffled space
    shuffled_correct_indices: BTreeSet<usize>,
}

impl ShuffleMap {
    /// The map that presents options in their original order
    pub fn identity(question: &QuestionRecord) -> Self {
        let order = (0..question.get_options().len()).collect();
        Self::build(question, order)
    }

    /// Draws a uniformly random option order for `question`
    pub fn random<R: Rng + ?Sized>(question: &QuestionRecord, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..question.get_options().len()).collect();
        order.shuffle(rng);
        Self::build(question, order)
    }

    /// Builds a map from an explicit presentation order
    ///
    /// `shuffled_to_original[i]` is the original position of the option shown
    /// at position `i`. Returns `None` unless it is a permutation of the
    /// question's option positions.
    pub fn from_permutation(
        question: &QuestionRecord,
        shuffled_to_original: Vec<usize>,
    ) -> Option<Self> {
        let count = question.get_options().len();
        if shuffled_to_original.len() != count {
            return None;
        }
        let distinct: BTreeSet<usize> = shuffled_to_original.iter().copied().collect();
        if distinct.len() != count || distinct.iter().any(|index| *index >= count) {
            return None;
        }
        Some(Self::build(question, shuffled_to_original))
    }

    fn build(question: &QuestionRecord, shuffled_to_original: Vec<usize>) -> Self {
        let options = question.get_options();
        let mut original_to_shuffled = vec![0; shuffled_to_original.len()];
        for (shuffled, original) in shuffled_to_original.iter().enumerate() {
            original_to_shuffled[*original] = shuffled;
        }

        let shuffled_options = shuffled_to_original
            .iter()
            .map(|original| options[*original].clone())
            .collect();

        let shuffled_correct_index = question
            .get_correct_index()
            .and_then(|index| original_to_shuffled.get(index).copied());

        let shuffled_correct_indices = question
            .get_correct_indices()
            .into_iter()
            .filter_map(|index| original_to_shuffled.get(index).copied())
            .collect();

        Self {
            shuffled_options,
            original_to_shuffled,
            shuffled_to_original,
            shuffled_correct_index,
            shuffled_correct_indices,
        }
    }

    pub fn get_shuffled_options(&self) -> &[String] {
        &self.shuffled_options
    }

    pub fn get_original_to_shuffled(&self) -> &[usize] {
        &self.original_to_shuffled
    }

    pub fn get_shuffled_to_original(&self) -> &[usize] {
        &self.shuffled_to_original
    }

    pub fn get_shuffled_correct_index(&self) -> Option<usize> {
        self.shuffled_correct_index
    }

    pub fn get_shuffled_correct_indices(&self) -> &BTreeSet<usize> {
        &self.shuffled_correct_indices
    }

    /// Translates a shuffled position back to its original position
    pub fn to_original(&self, shuffled: usize) -> Option<usize> {
        self.shuffled_to_original.get(shuffled).copied()
    }

    /// Translates an original position to where it is presented
    pub fn to_shuffled(&self, original: usize) -> Option<usize> {
        self.original_to_shuffled.get(original).copied()
    }

    /// Rewrites a shuffled-space answer into original space
    pub fn answer_to_original(&self, answer: &Answer) -> Answer {
        answer.translate(&self.shuffled_to_original)
    }

    /// Rewrites an original-space answer into shuffled space
    pub fn answer_to_shuffled(&self, answer: &Answer) -> Answer {
        answer.translate(&self.original_to_shuffled)
    }

    /// Whether every option is presented at its original position
    pub fn is_identity(&self) -> bool {
        self.shuffled_to_original
            .iter()
            .enumerate()
            .all(|(shuffled, original)| shuffled == *original)
    }
}
