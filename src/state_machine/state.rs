//! Conversation state types

use serde::{Deserialize, Serialize};

/// Whether the next free-text message from a user is a search query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatState {
    #[default]
    Idle,
    AwaitingSearchQuery,
}

impl ChatState {
    pub fn is_awaiting_query(self) -> bool {
        matches!(self, ChatState::AwaitingSearchQuery)
    }
}
