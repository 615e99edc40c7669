//! # Spinner Component
//!
//! One-line activity indicator shown below the transcript while a question
//! is in flight. Purely presentational: the frame index comes from the
//! event loop's animation clock.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Clone, Copy)]
pub struct Spinner<'a> {
    pub frame_index: usize,
    pub label: &'a str,
}

impl<'a> Spinner<'a> {
    pub fn new(frame_index: usize, label: &'a str) -> Self {
        Self { frame_index, label }
    }

    pub fn glyph(frame_index: usize) -> &'static str {
        FRAMES[frame_index % FRAMES.len()]
    }
}

impl Widget for Spinner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", Self::glyph(self.frame_index)),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                self.label.to_owned(),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ),
        ]);
        line.render(area, buf);
    }
}
