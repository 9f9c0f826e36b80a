//! Per-user conversation state machine
//!
//! Pure state transitions (`transition`) plus the per-user state map that
//! applies them atomically.

mod effect;
pub mod event;
pub mod state;
mod store;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::ChatState;
pub use store::ConversationStates;
pub use transition::{transition, TransitionResult};
