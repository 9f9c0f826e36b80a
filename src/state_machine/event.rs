//! Events that can occur in a conversation

/// Inputs that drive state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The "search" menu entry (or `/search`)
    SearchSelected,
    /// The "my favorites" menu entry (or `/favorites`)
    FavoritesSelected,
    /// `/start` and other explicit resets
    Reset,
    /// Any other free-text message
    Text { text: String },
}
