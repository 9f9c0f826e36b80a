//! Per-user conversation state

use super::{transition, ChatState, Event, TransitionResult};
use crate::favorites::UserId;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Current `ChatState` of every user. Users never seen are `Idle`.
#[derive(Default)]
pub struct ConversationStates {
    states: Mutex<HashMap<UserId, ChatState>>,
}

impl ConversationStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user: UserId) -> ChatState {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&user)
            .copied()
            .unwrap_or_default()
    }

    /// Run `event` through the state machine and store the new state.
    ///
    /// Read, transition and write happen under one lock, so two events for
    /// the same user can never both consume a single search prompt.
    pub fn apply(&self, user: UserId, event: Event) -> TransitionResult {
        let mut states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
        let current = states.get(&user).copied().unwrap_or_default();
        let result = transition(current, event);

        if result.new_state != current {
            tracing::debug!(user_id = user, from = ?current, to = ?result.new_state, "Conversation state changed");
        }
        match result.new_state {
            ChatState::Idle => {
                states.remove(&user);
            }
            state => {
                states.insert(user, state);
            }
        }
        result
    }
}
