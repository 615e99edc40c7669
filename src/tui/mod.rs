//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Request Flow
//!
//! ```text
//! Enter → InputEvent::Submit → update(Action::Submit) → Effect::SpawnRequest
//!       → tokio task: service.ask() → mpsc → update(Action::AnswerReceived)
//! ```
//!
//! The reducer refuses `Submit` while busy, so at most one task exists.
//!
//! ## Redraw Strategy
//!
//! - **Busy**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events or answers.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::ConversationState;
use crate::research::{AnsweringService, HttpResearchClient};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of the conversation)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub endpoint: String,
}

impl TuiState {
    pub fn new(endpoint: String, placeholder: String) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(placeholder),
            endpoint,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // The keyboard enhancement protocol is harmlessly ignored by terminals
        // that don't support it (allows Shift+Enter detection where it is)
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Runs `restore` on drop, so `?` exits from the loop leave the terminal usable.
struct RestoreGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let client = HttpResearchClient::new(&config.endpoint, config.timeout)
        .map_err(std::io::Error::other)?;
    let service: Arc<dyn AnsweringService> = Arc::new(client);
    info!(
        "Using research service at {} (timeout: {:?})",
        config.endpoint, config.timeout
    );

    let mut state = ConversationState::new();
    let mut tui = TuiState::new(config.endpoint.clone(), config.placeholder.clone());

    let mut terminal = ratatui::init();
    // Declared first so it drops last, after the terminal modes are popped
    let _restore_guard = RestoreGuard {
        restore: ratatui::restore,
    };
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Answers from the background request task
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        tui.input_box.busy = state.busy;
        if state.busy {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &state, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if state.busy {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => {}
                TuiEvent::Quit => {
                    if update(&mut state, Action::Quit) == Effect::Quit {
                        break 'main;
                    }
                }
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown => {
                    tui.message_list.handle_event(&event);
                }
                _ => {
                    if let Some(input_event) = tui.input_box.handle_event(&event) {
                        handle_input_event(input_event, &mut state, &mut tui, &service, &tx);
                    }
                }
            }
        }

        // Answers from the background task
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if update(&mut state, action) == Effect::Quit {
                break 'main;
            }
        }
    }

    info!(
        "Scout shutting down after {} messages",
        state.transcript.len()
    );
    Ok(())
}

fn handle_input_event(
    input_event: InputEvent,
    state: &mut ConversationState,
    tui: &mut TuiState,
    service: &Arc<dyn AnsweringService>,
    tx: &mpsc::Sender<Action>,
) {
    match input_event {
        InputEvent::ContentChanged => {
            update(state, Action::UpdateInput(tui.input_box.buffer.clone()));
        }
        InputEvent::Submit(text) => {
            if let Effect::SpawnRequest(question) = update(state, Action::Submit(text)) {
                tui.input_box.clear();
                tui.message_list.pin_to_bottom();
                spawn_request(service.clone(), question, tx.clone());
            }
        }
    }
}

fn spawn_request(service: Arc<dyn AnsweringService>, question: String, tx: mpsc::Sender<Action>) {
    info!("Spawning research request via {}", service.name());
    tokio::spawn(async move {
        let started = Instant::now();
        let result = service.ask(&question).await;
        info!(
            "Research request finished in {}ms (ok={})",
            started.elapsed().as_millis(),
            result.is_ok()
        );
        if tx.send(Action::AnswerReceived(result)).is_err() {
            warn!("Failed to send answer: receiver dropped");
        }
    });
}
