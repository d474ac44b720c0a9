use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::dto::QuestionDto;

/// The answer modality of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    /// Exactly one option is picked; evaluated on the first pick
    SingleChoice,
    /// Any number of options are toggled, then submitted
    MultipleChoice,
    /// The user types an answer, compared after normalization
    FreeText,
}

impl QuestionKind {
    /// Parses a `type` tag from a question set
    ///
    /// Accepts the short tags (`single`, `multiple`, `fill_in_blank`) as well
    /// as the kebab/snake spellings of the variant names.
    pub fn parse_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "single" | "single-choice" => Some(QuestionKind::SingleChoice),
            "multiple" | "multiple-choice" => Some(QuestionKind::MultipleChoice),
            "fill-in-blank" | "free-text" | "text" => Some(QuestionKind::FreeText),
            _ => None,
        }
    }

    /// The tag written back when serializing a question set
    pub fn wire_tag(&self) -> &'static str {
        match self {
            QuestionKind::SingleChoice => "single",
            QuestionKind::MultipleChoice => "multiple",
            QuestionKind::FreeText => "fill_in_blank",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuestionKind::SingleChoice => "single-choice",
            QuestionKind::MultipleChoice => "multiple-choice",
            QuestionKind::FreeText => "free-text",
        };
        f.write_str(name)
    }
}

/// The grading data of a question, tagged by its kind
///
/// All indices are original-space positions into the question's options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerKey {
    SingleChoice { correct_index: Option<usize> },
    MultipleChoice { correct_indices: BTreeSet<usize> },
    FreeText { correct_text: Option<String> },
}

/// A single question of a question set
///
/// Records are supplied by the caller and never change during a session.
/// They (de)serialize through the question-set wire format in [`crate::dto`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "QuestionDto", into = "QuestionDto")]
pub struct QuestionRecord {
    /// The question text; line breaks are a rendering concern
    prompt: String,

    /// Answer options in original order (empty for free-text questions)
    options: Vec<String>,

    /// Kind tag plus grading data
    key: AnswerKey,

    /// Opaque reference to an illustration, passed through untouched
    image: Option<String>,
}

impl QuestionRecord {
    /// Creates a single-choice question
    ///
    /// ### Arguments
    ///
    /// * `prompt` - The question text
    /// * `options` - The answer options in original order
    /// * `correct_index` - The position of the correct option, if known
    pub fn single_choice(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: Option<usize>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            key: AnswerKey::SingleChoice { correct_index },
            image: None,
        }
    }

    /// Creates a multiple-choice question
    ///
    /// ### Arguments
    ///
    /// * `prompt` - The question text
    /// * `options` - The answer options in original order
    /// * `correct_indices` - The positions of every correct option
    pub fn multiple_choice(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_indices: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            key: AnswerKey::MultipleChoice {
                correct_indices: correct_indices.into_iter().collect(),
            },
            image: None,
        }
    }

    /// Creates a free-text question
    ///
    /// A missing or blank `correct_text` makes the question unscorable.
    pub fn free_text(prompt: impl Into<String>, correct_text: Option<String>) -> Self {
        Self {
            prompt: prompt.into(),
            options: Vec::new(),
            key: AnswerKey::FreeText { correct_text },
            image: None,
        }
    }

    /// Creates a question from all of its parts
    pub fn new_with_fields(
        prompt: String,
        options: Vec<String>,
        key: AnswerKey,
        image: Option<String>,
    ) -> Self {
        Self {
            prompt,
            options,
            key,
            image,
        }
    }

    /// Attaches an image reference
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn get_kind(&self) -> QuestionKind {
        match self.key {
            AnswerKey::SingleChoice { .. } => QuestionKind::SingleChoice,
            AnswerKey::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            AnswerKey::FreeText { .. } => QuestionKind::FreeText,
        }
    }

    pub fn get_prompt(&self) -> &str {
        &self.prompt
    }

    pub fn get_options(&self) -> &[String] {
        &self.options
    }

    pub fn get_key(&self) -> &AnswerKey {
        &self.key
    }

    pub fn get_image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// The original-space correct index of a single-choice question
    pub fn get_correct_index(&self) -> Option<usize> {
        match &self.key {
            AnswerKey::SingleChoice { correct_index } => *correct_index,
            _ => None,
        }
    }

    /// The original-space correct indices of a multiple-choice question
    ///
    /// Empty for every other kind.
    pub fn get_correct_indices(&self) -> BTreeSet<usize> {
        match &self.key {
            AnswerKey::MultipleChoice { correct_indices } => correct_indices.clone(),
            _ => BTreeSet::new(),
        }
    }

    pub fn get_correct_text(&self) -> Option<&str> {
        match &self.key {
            AnswerKey::FreeText { correct_text } => correct_text.as_deref(),
            _ => None,
        }
    }

    /// Whether the question presents options to choose from
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Whether the question carries enough data to be auto-graded
    ///
    /// Unscorable questions (discussion prompts, choice questions without
    /// options or with an out-of-range key, free text without a key) are
    /// always counted correct.
    pub fn is_scorable(&self) -> bool {
        let count = self.options.len();
        match &self.key {
            AnswerKey::SingleChoice { correct_index } => {
                matches!(correct_index, Some(index) if *index < count)
            }
            AnswerKey::MultipleChoice { correct_indices } => {
                !correct_indices.is_empty() && correct_indices.iter().all(|index| *index < count)
            }
            AnswerKey::FreeText { correct_text } => correct_text
                .as_deref()
                .is_some_and(|text| !text.trim().is_empty()),
        }
    }
}
