//! # Actions
//!
//! Everything that can happen in Scout becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The research service replies? That's `Action::AnswerReceived(result)`.
//!
//! `update()` takes the current state and an action, mutates the state and
//! returns an [`Effect`] describing any I/O the caller must perform. No I/O
//! happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! The busy flag is the only gate: `Submit` while busy is dropped, and every
//! `AnswerReceived` clears it whether the call succeeded or not.

use log::{debug, info, warn};

use crate::core::message::Message;
use crate::core::state::ConversationState;
use crate::research::ResearchError;

/// Shown in the transcript for every failed request, whatever the cause.
pub const FAILURE_PLACEHOLDER: &str = "❌ Erreur lors de la requête.";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The input box content changed.
    UpdateInput(String),
    /// The user asked to send `text`.
    Submit(String),
    /// The in-flight request finished.
    AnswerReceived(Result<String, ResearchError>),
    Quit,
}

/// I/O the caller must perform after `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Send exactly one request carrying this question.
    SpawnRequest(String),
    Quit,
}

pub fn update(state: &mut ConversationState, action: Action) -> Effect {
    match action {
        Action::UpdateInput(text) => {
            state.pending_input = text;
            Effect::None
        }
        Action::Submit(text) => {
            if text.trim().is_empty() {
                debug!("Ignoring blank submission");
                return Effect::None;
            }
            if state.busy {
                debug!("Ignoring submission while a request is in flight");
                return Effect::None;
            }

            state.transcript.push(Message::user(text.clone()));
            state.pending_input.clear();
            state.busy = true;
            info!(
                "Question submitted ({} bytes), transcript now {} messages",
                text.len(),
                state.transcript.len()
            );
            Effect::SpawnRequest(text)
        }
        Action::AnswerReceived(result) => {
            if !state.busy {
                warn!("Answer received with no request in flight; recording anyway");
            }
            let text = match result {
                Ok(answer) => answer,
                Err(e) => {
                    warn!("Research request failed: {}", e);
                    FAILURE_PLACEHOLDER.to_string()
                }
            };
            state.transcript.push(Message::assistant(text));
            state.busy = false;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
