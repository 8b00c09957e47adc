//! Property-based tests for prompt composition
//!
//! - Only non-English targets carry a "respond in" instruction
//! - Unknown CEFR levels always get the B1 guidance
//! - The outbound sequence is the system turn plus the user/assistant window
//! - The feedback block appears exactly when requested

use super::*;
use proptest::prelude::*;

fn arb_window() -> impl Strategy<Value = Vec<Turn>> {
    proptest::collection::vec(
        (
            prop_oneof![
                3 => Just(Role::User),
                3 => Just(Role::Assistant),
                1 => Just(Role::System),
            ],
            "[a-zA-Z0-9 .,!?]{1,40}",
        )
            .prop_map(|(role, text)| Turn::new(role, text, "en")),
        0..=4,
    )
}

fn arb_level() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("A1".to_string()),
        Just("A2".to_string()),
        Just("B1".to_string()),
        Just("B2".to_string()),
        Just("C1".to_string()),
        Just("C2".to_string()),
        "[a-z0-9]{0,3}",
    ]
}

fn arb_options(language: impl Strategy<Value = String>) -> impl Strategy<Value = RequestOptions> {
    (language, arb_level(), any::<bool>()).prop_map(|(language, proficiency_level, provide_feedback)| {
        RequestOptions {
            language,
            proficiency_level,
            provide_feedback,
            ..RequestOptions::default()
        }
    })
}

proptest! {
    #[test]
    fn english_never_says_respond_in(
        window in arb_window(),
        options in arb_options(Just("en".to_string())),
        topic in proptest::option::of("[a-z ]{1,20}"),
    ) {
        let prompt = compose(&window, &options, topic.as_deref());
        prop_assert!(!prompt.instructions.to_lowercase().contains("respond in"));
    }

    #[test]
    fn other_languages_say_respond_in(
        window in arb_window(),
        options in arb_options(prop_oneof![
            Just("it".to_string()),
            Just("fr".to_string()),
            Just("de".to_string()),
        ]),
    ) {
        let prompt = compose(&window, &options, None);
        let expected = format!("respond in {}", language_name(&options.language));
        prop_assert!(prompt.instructions.contains(&expected));
    }

    #[test]
    fn unknown_level_uses_b1_guidance(
        level in "[a-z0-9]{0,3}",
        options in arb_options(Just("en".to_string())),
    ) {
        let options = RequestOptions { proficiency_level: level, ..options };
        let prompt = compose(&[], &options, None);
        prop_assert!(prompt.instructions.contains(CefrLevel::B1.guidance()));
    }

    #[test]
    fn turns_are_system_then_conversation(
        window in arb_window(),
        options in arb_options(Just("de".to_string())),
    ) {
        let prompt = compose(&window, &options, None);
        let conversation: Vec<_> = window
            .iter()
            .filter(|t| t.role != Role::System)
            .map(|t| PromptTurn::new(t.role, t.text.clone()))
            .collect();

        prop_assert_eq!(prompt.turns[0].role, Role::System);
        prop_assert_eq!(&prompt.turns[0].content, &prompt.instructions);
        prop_assert_eq!(&prompt.turns[1..], conversation.as_slice());
    }

    #[test]
    fn feedback_block_iff_requested(
        window in arb_window(),
        options in arb_options(Just("it".to_string())),
    ) {
        let prompt = compose(&window, &options, Some("pasta"));
        prop_assert_eq!(prompt.instructions.contains("Exercise:"), options.provide_feedback);
    }
}
