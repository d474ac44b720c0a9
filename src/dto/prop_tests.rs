use super::*;
use crate::test_utils::{arb_messy_string, arb_options};
use proptest::prelude::*;

/// Generates an arbitrary wire question, including malformed ones
fn arb_question_dto() -> impl Strategy<Value = QuestionDto> {
    (
        prop::option::of(prop_oneof![
            Just("single".to_string()),
            Just("multiple".to_string()),
            Just("fill_in_blank".to_string()),
            "[a-z_]{0,12}",
        ]),
        prop::option::of(arb_messy_string()),
        prop::option::of(arb_options(0, 6)),
        prop::option::of(-3i64..8),
        prop::option::of(prop::collection::vec(-3i64..8, 0..5)),
        prop::option::of(arb_messy_string()),
    )
        .prop_map(
            |(kind, question, options, correct_answer_index, correct_answer_indices, correct_answer)| {
                QuestionDto {
                    kind,
                    question,
                    options,
                    correct_answer_index,
                    correct_answer_indices,
                    correct_answer,
                    image: None,
                }
            },
        )
}

// ============================================================================
// D1: Kind Resolution
// ============================================================================

proptest! {
    /// D1.1: known tags resolve regardless of case and separator
    #[test]
    fn prop_d1_1_known_tags_resolve(
        tag in prop_oneof![Just("single"), Just("multiple"), Just("fill-in-blank")],
        upper in any::<bool>(),
        underscores in any::<bool>(),
        has_indices in any::<bool>(),
    ) {
        let mut written = if upper { tag.to_uppercase() } else { tag.to_string() };
        if underscores {
            written = written.replace('-', "_");
        }
        let expected = QuestionKind::parse_tag(tag).unwrap();
        prop_assert_eq!(resolve_kind(Some(&written), has_indices), expected);
    }

    /// D1.2: without a usable tag the answer fields decide
    #[test]
    fn prop_d1_2_inference_without_tag(has_indices in any::<bool>(), tag in "[0-9]{1,4}") {
        let expected = if has_indices {
            QuestionKind::MultipleChoice
        } else {
            QuestionKind::SingleChoice
        };
        prop_assert_eq!(resolve_kind(None, has_indices), expected);
        prop_assert_eq!(resolve_kind(Some(&tag), has_indices), expected);
    }
}

// ============================================================================
// D2: Conversion Robustness
// ============================================================================

proptest! {
    /// D2.1: any wire question converts, keeping prompt and options
    #[test]
    fn prop_d2_1_any_dto_converts(dto in arb_question_dto()) {
        let record = QuestionRecord::from(dto.clone());
        prop_assert_eq!(record.get_prompt(), dto.question.as_deref().unwrap_or_default());
        prop_assert_eq!(record.get_options(), dto.options.as_deref().unwrap_or_default());
    }

    /// D2.2: a negative multiple-choice index leaves the question unscorable
    #[test]
    fn prop_d2_2_negative_index_unscorable(
        options in arb_options(1, 6),
        mut indices in prop::collection::vec(0i64..6, 0..4),
        negative in -5i64..0,
    ) {
        indices.push(negative);
        let dto = QuestionDto {
            kind: Some("multiple".to_string()),
            question: Some("?".to_string()),
            options: Some(options),
            correct_answer_indices: Some(indices),
            ..Default::default()
        };
        prop_assert!(!QuestionRecord::from(dto).is_scorable());
    }

    /// D2.3: a negative single-choice index leaves the question without a key
    #[test]
    fn prop_d2_3_negative_single_index_dropped(index in -100i64..0) {
        let dto = QuestionDto {
            question: Some("?".to_string()),
            options: Some(vec!["A".to_string()]),
            correct_answer_index: Some(index),
            ..Default::default()
        };
        let record = QuestionRecord::from(dto);
        prop_assert_eq!(record.get_correct_index(), None);
        prop_assert!(!record.is_scorable());
    }

    /// D2.4: serialized records always carry an explicit tag that resolves to the same kind
    #[test]
    fn prop_d2_4_serialized_tag_resolves(dto in arb_question_dto()) {
        let record = QuestionRecord::from(dto);
        let back = QuestionDto::from(record.clone());
        let tag = back.kind.as_deref();
        prop_assert!(tag.is_some());
        prop_assert_eq!(resolve_kind(tag, false), record.get_kind());
    }
}
