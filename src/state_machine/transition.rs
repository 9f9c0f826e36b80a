//! Pure state transition function

use super::{ChatState, Effect, Event};

/// Result of a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs, with no I/O.
/// Every event is accepted in every state.
pub fn transition(state: ChatState, event: Event) -> TransitionResult {
    match (state, event) {
        // Entering search from anywhere (re)arms the query prompt
        (_, Event::SearchSelected) => {
            TransitionResult::new(ChatState::AwaitingSearchQuery).with_effect(Effect::PromptForQuery)
        }

        (_, Event::FavoritesSelected) => {
            TransitionResult::new(ChatState::Idle).with_effect(Effect::ShowFavorites)
        }

        (_, Event::Reset) => TransitionResult::new(ChatState::Idle).with_effect(Effect::ShowWelcome),

        // A blank message does not consume the prompt
        (ChatState::AwaitingSearchQuery, Event::Text { text }) if text.trim().is_empty() => {
            TransitionResult::new(ChatState::AwaitingSearchQuery).with_effect(Effect::PromptForQuery)
        }

        // The query is consumed exactly once, whatever the search yields
        (ChatState::AwaitingSearchQuery, Event::Text { text }) => {
            TransitionResult::new(ChatState::Idle).with_effect(Effect::search(text.trim()))
        }

        (ChatState::Idle, Event::Text { .. }) => {
            TransitionResult::new(ChatState::Idle).with_effect(Effect::DefaultReply)
        }
    }
}
