//! # Conversation Controller
//!
//! Drives one submission end to end: run the reducer, ask the
//! [`AnsweringService`], record the outcome. Observers are notified after each
//! state change so a view can re-render.
//!
//! The TUI does not use this type directly (its loop is synchronous and talks
//! to the reducer through a channel), but both paths share `update()`, so the
//! transitions are identical.

use std::sync::Arc;

use log::debug;

use crate::core::action::{Action, Effect, update};
use crate::core::state::ConversationState;
use crate::research::AnsweringService;

/// Called with the new state after every change.
pub type Observer = Box<dyn FnMut(&ConversationState) + Send>;

pub struct ConversationController {
    state: ConversationState,
    service: Arc<dyn AnsweringService>,
    observer: Option<Observer>,
}

impl ConversationController {
    pub fn new(service: Arc<dyn AnsweringService>) -> Self {
        Self {
            state: ConversationState::new(),
            service,
            observer: None,
        }
    }

    /// Registers the change observer, replacing any previous one.
    pub fn with_observer(mut self, observer: impl FnMut(&ConversationState) + Send + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn update_pending_input(&mut self, text: impl Into<String>) {
        self.dispatch(Action::UpdateInput(text.into()));
    }

    /// Sends `text` to the answering service and records the outcome.
    ///
    /// Blank text, or a call while a request is in flight, is a no-op.
    pub async fn submit(&mut self, text: impl Into<String>) {
        let Effect::SpawnRequest(question) = self.dispatch(Action::Submit(text.into())) else {
            return;
        };

        debug!("Controller asking {}", self.service.name());
        let result = self.service.ask(&question).await;
        self.dispatch(Action::AnswerReceived(result));
    }

    fn dispatch(&mut self, action: Action) -> Effect {
        let before = Snapshot::of(&self.state);
        let effect = update(&mut self.state, action);
        if !before.matches(&self.state)
            && let Some(observer) = self.observer.as_mut()
        {
            observer(&self.state);
        }
        effect
    }
}

/// What `update()` can change. The transcript is append-only, so its length
/// stands in for its contents.
struct Snapshot {
    transcript_len: usize,
    busy: bool,
    pending_input: String,
}

impl Snapshot {
    fn of(state: &ConversationState) -> Self {
        Self {
            transcript_len: state.transcript.len(),
            busy: state.busy,
            pending_input: state.pending_input.clone(),
        }
    }

    fn matches(&self, state: &ConversationState) -> bool {
        self.transcript_len == state.transcript.len()
            && self.busy == state.busy
            && self.pending_input == state.pending_input
    }
}
