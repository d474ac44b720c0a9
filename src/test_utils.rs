use crate::models::QuestionRecord;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeSet;

/// Generates strings with surrounding whitespace, mixed case and unicode
pub fn arb_messy_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\PC*",
        "[ \\t]{0,3}[a-zA-Z0-9 ]{0,12}[ \\t\\n]{0,3}",
        Just(String::new()),
    ]
}

/// Generates a list of option texts
pub fn arb_options(min: usize, max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Za-z0-9 ]{1,10}", min..=max)
}

/// Generates a single-choice question with a valid key
pub fn arb_single_choice() -> impl Strategy<Value = QuestionRecord> {
    arb_options(1, 8).prop_flat_map(|options| {
        let count = options.len();
        (Just(options), 0..count).prop_map(|(options, correct)| {
            QuestionRecord::single_choice("single", options, Some(correct))
        })
    })
}

/// Generates a multiple-choice question with a valid, non-empty key
pub fn arb_multiple_choice() -> impl Strategy<Value = QuestionRecord> {
    arb_options(1, 8).prop_flat_map(|options| {
        let count = options.len();
        (
            Just(options),
            prop::collection::btree_set(0..count, 1..=count),
        )
            .prop_map(|(options, correct)| {
                QuestionRecord::multiple_choice("multiple", options, correct)
            })
    })
}

/// Generates a free-text question with a non-blank key
pub fn arb_free_text() -> impl Strategy<Value = QuestionRecord> {
    "[ ]{0,2}[A-Za-z]{1,10}[ ]{0,2}".prop_map(|text| QuestionRecord::free_text("text", Some(text)))
}

/// Generates a question that cannot be auto-graded
pub fn arb_unscorable() -> impl Strategy<Value = QuestionRecord> {
    prop_oneof![
        Just(QuestionRecord::single_choice("info", Vec::new(), None)),
        arb_options(1, 5).prop_map(|options| QuestionRecord::single_choice("no key", options, None)),
        arb_options(1, 5).prop_map(|options| {
            let count = options.len();
            QuestionRecord::single_choice("bad key", options, Some(count))
        }),
        Just(QuestionRecord::free_text("discuss", None)),
        Just(QuestionRecord::free_text("discuss", Some("   ".to_string()))),
    ]
}

/// Generates any gradeable question
pub fn arb_question() -> impl Strategy<Value = QuestionRecord> {
    prop_oneof![
        3 => arb_single_choice(),
        3 => arb_multiple_choice(),
        2 => arb_free_text(),
        1 => arb_unscorable(),
    ]
}

/// Generates a non-empty question set
pub fn arb_question_set() -> impl Strategy<Value = Vec<QuestionRecord>> {
    prop::collection::vec(arb_question(), 1..12)
}

/// Generates an insertion order for a set of indices
pub fn arb_insertion_order(indices: BTreeSet<usize>) -> impl Strategy<Value = Vec<usize>> {
    Just(indices.into_iter().collect::<Vec<_>>()).prop_shuffle()
}

/// Generates a seeded RNG so failures are reproducible
pub fn arb_rng() -> impl Strategy<Value = StdRng> {
    any::<u64>().prop_map(StdRng::seed_from_u64)
}
