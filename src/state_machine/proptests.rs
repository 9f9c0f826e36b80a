//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::*;
use proptest::prelude::*;

fn arb_query() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z ]{0,20}".prop_map(String::from)
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::SearchSelected),
        Just(Event::FavoritesSelected),
        Just(Event::Reset),
        arb_query().prop_map(|text| Event::Text { text }),
        "[ \t]{0,3}".prop_map(|text| Event::Text { text }),
    ]
}

fn arb_state() -> impl Strategy<Value = ChatState> {
    prop_oneof![Just(ChatState::Idle), Just(ChatState::AwaitingSearchQuery)]
}

fn is_search(effect: &Effect) -> bool {
    matches!(effect, Effect::SearchCatalog { .. })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    // Exactly one effect per transition
    #[test]
    fn prop_single_effect(state in arb_state(), event in arb_event()) {
        let result = transition(state, event);
        prop_assert_eq!(result.effects.len(), 1);
    }

    // A search only ever comes out of AwaitingSearchQuery, and always lands in Idle
    #[test]
    fn prop_search_only_when_awaiting(state in arb_state(), event in arb_event()) {
        let result = transition(state, event);
        if result.effects.iter().any(is_search) {
            prop_assert_eq!(state, ChatState::AwaitingSearchQuery);
            prop_assert_eq!(result.new_state, ChatState::Idle);
        }
    }

    // Reset always lands in Idle
    #[test]
    fn prop_reset_is_unconditional(state in arb_state()) {
        prop_assert_eq!(transition(state, Event::Reset).new_state, ChatState::Idle);
    }

    // Between two SearchSelected events at most one search happens
    #[test]
    fn prop_one_query_per_prompt(
        state in arb_state(),
        texts in proptest::collection::vec(arb_query(), 1..6),
    ) {
        let mut current = transition(state, Event::SearchSelected).new_state;
        let mut searches = Vec::new();

        for text in texts {
            let result = transition(current, Event::Text { text });
            current = result.new_state;
            searches.extend(result.effects.into_iter().filter(is_search));
        }

        prop_assert_eq!(searches.len(), 1);
        prop_assert_eq!(current, ChatState::Idle);
    }

    // Arbitrary histories through the per-user store agree with the pure function
    #[test]
    fn prop_store_matches_pure_fold(events in proptest::collection::vec(arb_event(), 0..30)) {
        let states = ConversationStates::new();
        let mut expected = ChatState::Idle;

        for event in events {
            let pure = transition(expected, event.clone());
            let applied = states.apply(1, event);
            prop_assert_eq!(&applied, &pure);
            expected = pure.new_state;
            prop_assert_eq!(states.get(1), expected);
        }
    }
}
