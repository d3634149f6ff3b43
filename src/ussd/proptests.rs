//! Property-based tests for the dialogue engine
//!
//! These check the positional invariants across arbitrary inputs.

use super::evaluator::{evaluate, Step};
use super::flows::FlowRegistry;
use super::reply::Reply;
use super::router::{route, Route};
use super::session::SessionState;
use super::tokenizer::{tokenize, SEPARATOR};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_token() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .]{1,12}"
}

fn arb_selector() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["1", "2", "3", "4", "5", "6", "7", "8", "9"])
}

/// A flow with fields, plus fewer answers than it has fields
fn arb_partial_flow() -> impl Strategy<Value = (&'static str, Vec<String>)> {
    prop::sample::select(vec!["1", "2", "3", "4", "5", "6", "7", "9"]).prop_flat_map(|selector| {
        let fields = FlowRegistry::builtin()
            .get(selector)
            .map_or(1, |flow| flow.fields.len());
        (Just(selector), prop::collection::vec(arb_token(), 0..fields))
    })
}

fn arb_unknown_selector() -> impl Strategy<Value = String> {
    "[a-z0-9#]{1,4}".prop_filter("must not be a registered selector", |s| {
        FlowRegistry::builtin().get(s).is_none()
    })
}

fn arb_text() -> impl Strategy<Value = String> {
    "[0-9a-z*]{0,40}"
}

// ============================================================================
// Tokenizer and encoder
// ============================================================================

proptest! {
    /// Tokens are never empty and never contain the separator
    #[test]
    fn prop_tokens_are_clean(text in arb_text()) {
        for token in tokenize(Some(text.as_str())) {
            prop_assert!(!token.is_empty());
            prop_assert!(!token.contains(SEPARATOR));
        }
    }

    /// Joining tokens back loses only the empty segments
    #[test]
    fn prop_tokens_preserve_content(tokens in prop::collection::vec(arb_token(), 0..10)) {
        let text = tokens.join(&SEPARATOR.to_string());
        prop_assert_eq!(tokenize(Some(text.as_str())), tokens);
    }

    /// Doubling separators never changes the token sequence
    #[test]
    fn prop_extra_separators_ignored(text in arb_text()) {
        let doubled = text.replace(SEPARATOR, "**");
        let wrapped = format!("*{text}*");
        prop_assert_eq!(tokenize(Some(doubled.as_str())), tokenize(Some(text.as_str())));
        prop_assert_eq!(tokenize(Some(wrapped.as_str())), tokenize(Some(text.as_str())));
    }

    /// Encoded replies are always the kind token, a space, then the message verbatim
    #[test]
    fn prop_encoding_frames_message(message in ".{0,60}", end in any::<bool>()) {
        let reply = if end { Reply::end(message.clone()) } else { Reply::cont(message.clone()) };
        let encoded = reply.encode();
        let prefix = if end { "END " } else { "CON " };
        prop_assert!(encoded.starts_with(prefix));
        prop_assert_eq!(encoded.strip_prefix(prefix), Some(message.as_str()));
    }
}

// ============================================================================
// Routing and evaluation
// ============================================================================

proptest! {
    /// With k < len(prompts) answers, the next prompt is prompts[k], whatever the answers say
    #[test]
    fn prop_prompt_is_positional((selector, answers) in arb_partial_flow()) {
        let registry = FlowRegistry::builtin();
        let flow = registry.get(selector).unwrap();
        let k = answers.len();

        let state = SessionState::new(flow.id, answers);
        prop_assert_eq!(evaluate(flow, &state), Step::Prompt(flow.fields[k].prompt));
    }

    /// Sending required_token_count - 1 tokens asks the last prompt
    #[test]
    fn prop_one_short_asks_last_prompt(
        selector in arb_selector(),
        answers in prop::collection::vec(arb_token(), 12),
    ) {
        let registry = FlowRegistry::builtin();
        let flow = registry.get(selector).unwrap();
        prop_assume!(!flow.fields.is_empty());

        let mut tokens = vec![selector.to_string()];
        tokens.extend(answers.into_iter().take(flow.required_token_count() - 2));

        let Route::Flow { flow, state } = route(&registry, &tokens) else {
            return Err(TestCaseError::fail("known selector routed to menu"));
        };
        let last = flow.fields.last().unwrap().prompt;
        prop_assert_eq!(evaluate(flow, &state), Step::Prompt(last));
    }

    /// Once every field is answered the evaluator never prompts again
    #[test]
    fn prop_complete_input_never_prompts(
        selector in arb_selector(),
        answers in prop::collection::vec(arb_token(), 9..16),
    ) {
        let registry = FlowRegistry::builtin();
        let flow = registry.get(selector).unwrap();
        let state = SessionState::new(flow.id, answers);
        let step = evaluate(flow, &state);
        prop_assert!(!matches!(step, Step::Prompt(_)));
    }

    /// Unknown selectors always route to the root menu
    #[test]
    fn prop_unknown_selector_is_menu(
        selector in arb_unknown_selector(),
        answers in prop::collection::vec(arb_token(), 0..5),
    ) {
        let registry = FlowRegistry::builtin();
        let mut tokens = vec![selector];
        tokens.extend(answers);
        prop_assert!(matches!(route(&registry, &tokens), Route::RootMenu));
    }

    /// Evaluation is a pure function of its inputs
    #[test]
    fn prop_evaluation_deterministic(
        selector in arb_selector(),
        answers in prop::collection::vec(arb_token(), 0..12),
    ) {
        let registry = FlowRegistry::builtin();
        let flow = registry.get(selector).unwrap();
        let state = SessionState::new(flow.id, answers);
        prop_assert_eq!(evaluate(flow, &state), evaluate(flow, &state.clone()));
    }
}
