use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::ConversationState;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, TitleBar};

/// Draws the whole screen: title bar, transcript, input box.
pub fn draw_ui(
    frame: &mut Frame,
    state: &ConversationState,
    tui: &mut TuiState,
    spinner_frame: usize,
) {
    use Constraint::{Length, Min};

    let input_height = tui.input_box.calculate_height(frame.area().width);
    let layout = Layout::vertical([Length(1), Min(0), Length(input_height)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    MessageList::new(
        &mut tui.message_list,
        &state.transcript,
        state.busy,
        spinner_frame,
    )
    .render(frame, main_area);

    let status = if state.busy { "Searching…" } else { "" };
    TitleBar::new(
        tui.endpoint.clone(),
        status.to_string(),
        tui.message_list.has_unseen_content(),
    )
    .render(frame, title_area);

    tui.input_box.render(frame, input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(state: &ConversationState, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw_ui(f, state, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn tui_state() -> TuiState {
        TuiState::new("http://localhost:8000/research".to_string(), "Écrire un message…".to_string())
    }

    #[test]
    fn test_draw_ui_empty() {
        let state = ConversationState::new();
        let mut tui = tui_state();
        let text = screen(&state, &mut tui);
        assert!(text.contains("Scout (http://localhost:8000/research)"));
        assert!(text.contains("Écrire un message…"));
    }

    #[test]
    fn test_draw_ui_busy_then_answered() {
        let mut state = ConversationState::new();
        let mut tui = tui_state();
        update(&mut state, Action::Submit("What is 2+2?".to_string()));
        tui.input_box.busy = state.busy;

        let text = screen(&state, &mut tui);
        assert!(text.contains("What is 2+2?"));
        assert!(text.contains("Searching…"));

        update(&mut state, Action::AnswerReceived(Ok("The answer is **4**.".to_string())));
        tui.input_box.busy = state.busy;

        let text = screen(&state, &mut tui);
        assert!(text.contains("The answer is 4."));
        assert!(!text.contains("Searching…"));
    }
}
