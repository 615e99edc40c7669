//! # Conversation State
//!
//! Everything the chat view shows, in one struct. No TUI types here;
//! presentation state (scroll offsets, cursor) lives in the `tui` module.
//!
//! ```text
//! ConversationState
//! ├── transcript: Transcript     // append-only message history
//! ├── pending_input: String      // unsent text in the input box
//! └── busy: bool                 // a question is in flight
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::message::Transcript;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    pub transcript: Transcript,
    pub pending_input: String,
    pub busy: bool,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_idle_and_empty() {
        let state = ConversationState::new();
        assert!(state.transcript.is_empty());
        assert!(state.pending_input.is_empty());
        assert!(!state.busy);
    }
}
