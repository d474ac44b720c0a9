use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

use crate::models::{AnswerKey, QuestionKind, QuestionRecord};

/// Data transfer object for one question of a question set
///
/// This is the JSON shape question sets are authored in. Every key is
/// optional; the question kind is resolved once, when converting into a
/// [`QuestionRecord`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    /// Kind tag (`single`, `multiple`, `fill_in_blank`)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// The prompt text
    #[serde(default)]
    pub question: Option<String>,

    /// The answer options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    /// The correct option of a single-choice question
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer_index: Option<i64>,

    /// The correct options of a multiple-choice question
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer_indices: Option<Vec<i64>>,

    /// The expected text of a free-text question
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,

    /// Illustration reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Resolves the kind of a wire question
///
/// A recognised `type` tag wins. Otherwise the kind is inferred: a non-empty
/// list of correct indices means multiple choice, anything else single choice.
pub fn resolve_kind(tag: Option<&str>, has_correct_indices: bool) -> QuestionKind {
    if let Some(tag) = tag {
        match QuestionKind::parse_tag(tag) {
            Some(kind) => return kind,
            None => warn!("Unknown question type {:?}, inferring from answer fields", tag),
        }
    }

    if has_correct_indices {
        QuestionKind::MultipleChoice
    } else {
        QuestionKind::SingleChoice
    }
}

impl From<QuestionDto> for QuestionRecord {
    fn from(dto: QuestionDto) -> Self {
        let raw_indices = dto.correct_answer_indices.unwrap_or_default();
        let kind = resolve_kind(dto.kind.as_deref(), !raw_indices.is_empty());

        let key = match kind {
            QuestionKind::SingleChoice => AnswerKey::SingleChoice {
                correct_index: dto
                    .correct_answer_index
                    .and_then(|index| usize::try_from(index).ok()),
            },
            QuestionKind::MultipleChoice => {
                let parsed: Option<BTreeSet<usize>> = raw_indices
                    .iter()
                    .map(|index| usize::try_from(*index).ok())
                    .collect();
                // Any negative index leaves the question unscorable
                let correct_indices = parsed.unwrap_or_else(|| {
                    warn!("Negative correct index in {:?}, question left unscored", raw_indices);
                    BTreeSet::new()
                });
                AnswerKey::MultipleChoice { correct_indices }
            }
            QuestionKind::FreeText => AnswerKey::FreeText {
                correct_text: dto.correct_answer,
            },
        };

        QuestionRecord::new_with_fields(
            dto.question.unwrap_or_default(),
            dto.options.unwrap_or_default(),
            key,
            dto.image,
        )
    }
}

impl From<QuestionRecord> for QuestionDto {
    fn from(record: QuestionRecord) -> Self {
        let kind = record.get_kind();
        let options = record.get_options().to_vec();
        let mut dto = QuestionDto {
            kind: Some(kind.wire_tag().to_string()),
            question: Some(record.get_prompt().to_string()),
            options: (!options.is_empty()).then_some(options),
            image: record.get_image().map(str::to_string),
            ..Default::default()
        };

        match record.get_key() {
            AnswerKey::SingleChoice { correct_index } => {
                dto.correct_answer_index = correct_index.and_then(|index| i64::try_from(index).ok());
            }
            AnswerKey::MultipleChoice { correct_indices } => {
                dto.correct_answer_indices = Some(
                    correct_indices
                        .iter()
                        .filter_map(|index| i64::try_from(*index).ok())
                        .collect(),
                );
            }
            AnswerKey::FreeText { correct_text } => {
                dto.correct_answer = correct_text.clone();
            }
        }

        dto
    }
}

#[cfg(test)]
mod prop_tests;
