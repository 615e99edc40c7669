//! # InputBox Component
//!
//! The question field and its "Search" affordance.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, Ctrl+J newlines)
//! - Handle editing (backspace, delete, cursor movement)
//! - Emit `Submit` on Enter
//! - Show a placeholder when empty and a dimmed "Search" label while busy
//!
//! ## State Management
//!
//! The buffer is internal state; the core mirrors it as `pending_input` via
//! `ContentChanged`. `Submit` does NOT clear the buffer: the parent calls
//! [`InputBox::clear`] only once the core has accepted the submission, so a
//! question typed while busy is kept.
//!
//! Text is hard-wrapped by display width (not word-wrapped) so the cursor maps
//! exactly onto screen cells.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Borders consumed horizontally by the bordered block
const HORIZONTAL_OVERHEAD: u16 = 2;
/// Top + bottom borders consumed vertically
const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in
const MAX_VISIBLE_LINES: u16 = 5;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User pressed Enter with this buffer content
    Submit(String),
    /// Buffer or cursor changed
    ContentChanged,
}

/// Text input component.
///
/// # Props
///
/// - `busy`: a question is in flight (dims the Search label)
/// - `placeholder`: hint shown while the buffer is empty
pub struct InputBox {
    pub buffer: String,
    pub busy: bool,
    pub placeholder: String,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
}

impl InputBox {
    pub fn new(placeholder: String) -> Self {
        Self {
            buffer: String::new(),
            busy: false,
            placeholder,
            cursor: 0,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Height for the current buffer, clamped to [1, MAX_VISIBLE_LINES] content lines.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let lines = wrap_ranges(&self.buffer, inner_width(area_width)).len() as u16;
        lines.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// (line index, column) of the cursor within the wrapped buffer.
    fn cursor_line_col(&self, ranges: &[(usize, usize)]) -> (usize, u16) {
        let line = ranges
            .iter()
            .rposition(|&(start, _)| start <= self.cursor)
            .unwrap_or(0);
        let start = ranges.get(line).map_or(0, |&(s, _)| s);
        let col = self.buffer[start..self.cursor].width() as u16;
        (line, col)
    }

    fn search_label(&self) -> Line<'static> {
        let (label, style) = if self.busy {
            (" Searching… ", Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM))
        } else {
            (" Search ⏎ ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        };
        Line::from(Span::styled(label, style)).right_aligned()
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        let ranges = wrap_ranges(&self.buffer, width);
        let (cursor_line, cursor_col) = self.cursor_line_col(&ranges);

        // Keep the cursor line inside the visible window
        let first_visible = cursor_line.saturating_sub(MAX_VISIBLE_LINES as usize - 1);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Question")
            .title_top(self.search_label());

        let body: Vec<Line<'static>> = if self.buffer.is_empty() {
            vec![Line::from(Span::styled(
                self.placeholder.clone(),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ))]
        } else {
            ranges
                .iter()
                .skip(first_visible)
                .take(MAX_VISIBLE_LINES as usize)
                .map(|&(start, end)| Line::raw(self.buffer[start..end].to_owned()))
                .collect()
        };

        let input = Paragraph::new(body)
            .block(block)
            .style(Style::default().fg(Color::Cyan));
        frame.render_widget(input, area);

        let visible_line = (cursor_line - first_visible) as u16;
        let x = area.x + 1 + cursor_col.min(width.saturating_sub(1));
        let y = area.y + 1 + visible_line;
        frame.set_cursor_position((x, y));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Terminals send CRLF in pastes; keep plain newlines
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map_or(0, |i| i + 1);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map_or(self.buffer.len(), |i| self.cursor + i);
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Submit => Some(InputEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}

fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Splits `text` into byte ranges of at most `width` display columns,
/// breaking at explicit newlines (which are excluded from the ranges).
/// Always returns at least one range.
fn wrap_ranges(text: &str, width: u16) -> Vec<(usize, usize)> {
    let width = usize::from(width.max(1));
    let mut ranges = vec![];
    let mut start = 0;
    let mut col = 0;

    for (i, c) in text.char_indices() {
        if c == '\n' {
            ranges.push((start, i));
            start = i + 1;
            col = 0;
            continue;
        }
        let w = c.width().unwrap_or(0);
        if col + w > width && col > 0 {
            ranges.push((start, i));
            start = i;
            col = 0;
        }
        col += w;
    }
    ranges.push((start, text.len()));
    ranges
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map_or(0, |(i, _)| i)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map_or(text.len(), |(i, _)| pos + i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn input() -> InputBox {
        InputBox::new("Écrire un message…".to_string())
    }

    fn typed(text: &str) -> InputBox {
        let mut input = input();
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        input
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_handle_input() {
        let mut input = input();

        assert_eq!(
            input.handle_event(&TuiEvent::InputChar('a')),
            Some(InputEvent::ContentChanged)
        );
        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "ab");

        assert_eq!(
            input.handle_event(&TuiEvent::Backspace),
            Some(InputEvent::ContentChanged)
        );
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_submit_keeps_buffer_until_cleared() {
        let mut input = typed("hello");

        let res = input.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(InputEvent::Submit("hello".to_string())));
        assert_eq!(input.buffer, "hello");

        input.clear();
        assert!(input.buffer.is_empty());
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_submit_blank_still_emitted() {
        // Blank filtering is the core's job
        let mut input = typed("  ");
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit("  ".to_string()))
        );
    }

    #[test]
    fn test_cursor_editing_multibyte() {
        let mut input = typed("héllo");
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::CursorRight);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "hllo");
        input.handle_event(&TuiEvent::InputChar('é'));
        assert_eq!(input.buffer, "héllo");
        input.handle_event(&TuiEvent::CursorEnd);
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "héll");
    }

    #[test]
    fn test_home_end_stay_on_logical_line() {
        let mut input = typed("ab\ncd");
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::InputChar('X'));
        assert_eq!(input.buffer, "ab\nXcd");
        assert_eq!(input.handle_event(&TuiEvent::CursorLeft), Some(InputEvent::ContentChanged));
        assert_eq!(input.handle_event(&TuiEvent::CursorHome), None);
    }

    #[test]
    fn test_paste_normalizes_crlf() {
        let mut input = input();
        input.handle_event(&TuiEvent::Paste("a\r\nb".to_string()));
        assert_eq!(input.buffer, "a\nb");
    }

    #[test]
    fn test_wrap_ranges() {
        assert_eq!(wrap_ranges("", 10), vec![(0, 0)]);
        assert_eq!(wrap_ranges("abcdef", 4), vec![(0, 4), (4, 6)]);
        assert_eq!(wrap_ranges("ab\ncd", 10), vec![(0, 2), (3, 5)]);
        assert_eq!(wrap_ranges("ab\n", 10), vec![(0, 2), (3, 3)]);
    }

    #[test]
    fn test_height_is_clamped() {
        assert_eq!(input().calculate_height(40), 1 + VERTICAL_OVERHEAD);
        let tall = typed("1\n2\n3\n4\n5\n6\n7\n8");
        assert_eq!(tall.calculate_height(40), MAX_VISIBLE_LINES + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_render_shows_placeholder_when_empty() {
        let mut terminal = Terminal::new(TestBackend::new(50, 3)).unwrap();
        let mut input = input();
        terminal.draw(|f| input.render(f, f.area())).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Écrire un message…"));
        assert!(text.contains("Search"));
    }

    #[test]
    fn test_render_shows_searching_while_busy() {
        let mut terminal = Terminal::new(TestBackend::new(50, 3)).unwrap();
        let mut input = typed("next question");
        input.busy = true;
        terminal.draw(|f| input.render(f, f.area())).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("next question"));
        assert!(text.contains("Searching…"));
        assert!(!text.contains("Écrire"));
    }
}
