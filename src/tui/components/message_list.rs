//! # MessageList Component
//!
//! Scrollable view of the transcript.
//!
//! ## Responsibilities
//!
//! - Lay out and draw every message as a bubble
//! - Keep the view pinned to the newest message unless the user scrolled away
//! - Show the spinner row under the last message while a question is in flight
//! - Show a short hint when the transcript is empty
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent scroll state) and the `Transcript`
//! (props).

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::Transcript;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageView;
use crate::tui::components::spinner::Spinner;
use crate::tui::event::TuiEvent;

/// Rows reserved under the transcript for the spinner (1 blank + 1 spinner).
const SPINNER_ROWS: u16 = 2;

/// Rows of scrollback held in the scroll canvas. Older messages that do not
/// fit are summarized by a one-line notice at the top.
const MAX_CANVAS_HEIGHT: u16 = 8192;

/// A single message never takes more than this many canvas rows.
const MAX_MESSAGE_HEIGHT: u16 = MAX_CANVAS_HEIGHT / 2;

/// Rows available to messages once the notice and spinner rows are reserved.
const MESSAGE_BUDGET: u16 = MAX_CANVAS_HEIGHT - SPINNER_ROWS - 1;

const EMPTY_HINT: &str = "Ask the research agent anything.";

/// Scroll state for the message list. Persisted in the parent `TuiState`.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Canvas height from the last render
    pub content_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
            content_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Re-engage auto-scroll once the user has scrolled back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Jump to the newest message and follow new content again.
    pub fn pin_to_bottom(&mut self) {
        self.stick_to_bottom = true;
        self.scroll_state.scroll_to_bottom();
    }

    /// True when part of the transcript lies below the visible window.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom && self.scroll_state.offset().y < self.max_offset()
    }
}

/// Scrollable conversation view component.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
    pub busy: bool,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        transcript: &'a Transcript,
        busy: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            transcript,
            busy,
            spinner_frame,
        }
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let [hint_area] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(area);
        let hint = Paragraph::new(Line::from(Span::styled(
            EMPTY_HINT,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(hint, hint_area);
    }

    /// Measures messages the cache has not seen yet.
    fn update_layout(&mut self, content_width: u16) {
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(self.transcript.len(), content_width);
        layout.heights.truncate(reusable);

        for message in self.transcript.iter().skip(reusable) {
            let height = MessageView::new(message, content_width)
                .height()
                .min(MAX_MESSAGE_HEIGHT);
            layout.heights.push(height);
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(self.transcript.len(), content_width);
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.viewport_height = area.height;

        if self.transcript.is_empty() && !self.busy {
            self.state.content_height = 0;
            self.render_empty(frame, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        self.update_layout(content_width);

        let first = self.state.layout.window_start(MESSAGE_BUDGET);
        let notice_rows: u16 = if first > 0 { 1 } else { 0 };
        let base = self.state.layout.top_of(first);
        let messages_height = canvas_row(self.state.layout.total_height() - base);
        let spinner_rows = if self.busy { SPINNER_ROWS } else { 0 };
        self.state.content_height = notice_rows
            .saturating_add(messages_height)
            .saturating_add(spinner_rows)
            .min(MAX_CANVAS_HEIGHT);

        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, self.state.content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        if notice_rows > 0 {
            let notice = Paragraph::new(Line::from(Span::styled(
                format!("… {first} earlier messages not shown"),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
            scroll_view.render_widget(notice, Rect::new(0, 0, content_width, 1));
        }

        // Pinned views draw the rows scroll_to_bottom is about to reveal
        let scroll_offset = if self.state.stick_to_bottom {
            self.state.max_offset()
        } else {
            self.state.scroll_state.offset().y
        };
        let layout = &self.state.layout;
        let window_top = base + u32::from(scroll_offset.saturating_sub(notice_rows));
        let visible = layout.visible_range(first, window_top, area.height);
        for index in visible {
            let Some(message) = self.transcript.get(index) else {
                break;
            };
            let y = notice_rows.saturating_add(canvas_row(layout.top_of(index) - base));
            let height = layout.heights[index];
            let view = MessageView::new(message, content_width);
            scroll_view.render_widget(view, Rect::new(0, y, content_width, height));
        }

        if self.busy {
            let y = notice_rows.saturating_add(messages_height).saturating_add(1);
            let spinner_rect = Rect::new(0, y, content_width, 1);
            scroll_view.render_widget(Spinner::new(self.spinner_frame, "Searching…"), spinner_rect);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

fn canvas_row(rows: u32) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Cached message heights for the transcript.
///
/// The transcript is append-only, so a cached height stays valid until the
/// content width changes.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    /// Running totals: `prefix_heights[i]` is the bottom row of message `i`.
    pub prefix_heights: Vec<u32>,
    message_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            message_count: 0,
            content_width: 0,
        }
    }

    /// How many cached heights are still valid for this frame.
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width || message_count < self.message_count {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn update_metadata(&mut self, message_count: usize, content_width: u16) {
        self.message_count = message_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u32, |acc, &h| {
                *acc = acc.saturating_add(u32::from(h));
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u32 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Top row of message `index`.
    pub fn top_of(&self, index: usize) -> u32 {
        match index.checked_sub(1) {
            Some(prev) => self.prefix_heights.get(prev).copied().unwrap_or(0),
            None => 0,
        }
    }

    /// Oldest message such that it and everything after it fit in `budget`
    /// rows. The newest message is always included.
    pub fn window_start(&self, budget: u16) -> usize {
        let floor = self.total_height().saturating_sub(u32::from(budget));
        if floor == 0 {
            return 0;
        }
        let partial = self.prefix_heights.partition_point(|&end| end < floor);
        (partial + 1).min(self.prefix_heights.len().saturating_sub(1))
    }

    /// Messages at or after `first` that intersect the viewport starting at
    /// row `top`, plus half a viewport either side.
    pub fn visible_range(
        &self,
        first: usize,
        top: u32,
        viewport_height: u16,
    ) -> std::ops::Range<usize> {
        let buffer = u32::from(viewport_height / 2);
        let buffered_start = top.saturating_sub(buffer);
        let buffered_end = top
            .saturating_add(u32::from(viewport_height))
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start)
            .max(first);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }
}

/// Implemented on the state: events must survive the per-frame `MessageList`.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Message;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(state: &mut MessageListState, transcript: &Transcript, busy: bool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|f| MessageList::new(state, transcript, busy, 0).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn long_transcript() -> Transcript {
        let mut transcript = Transcript::new();
        for i in 0..10 {
            transcript.push(Message::user(format!("question {i}")));
            transcript.push(Message::assistant(format!("answer {i}")));
        }
        transcript
    }

    #[test]
    fn empty_transcript_shows_hint() {
        let mut state = MessageListState::new();
        let text = draw(&mut state, &Transcript::new(), false);
        assert!(text.contains(EMPTY_HINT));
    }

    #[test]
    fn busy_shows_spinner_label() {
        let mut state = MessageListState::new();
        let mut transcript = Transcript::new();
        transcript.push(Message::user("What is 2+2?"));
        let text = draw(&mut state, &transcript, true);
        assert!(text.contains("What is 2+2?"));
        assert!(text.contains("Searching…"));
    }

    #[test]
    fn sticks_to_newest_message() {
        let mut state = MessageListState::new();
        let transcript = long_transcript();
        let text = draw(&mut state, &transcript, false);
        assert!(text.contains("answer 9"));
        assert!(!text.contains("question 0"));
        assert!(!state.has_unseen_content());
    }

    #[test]
    fn scrolling_up_unpins_and_flags_unseen_content() {
        let mut state = MessageListState::new();
        let transcript = long_transcript();
        draw(&mut state, &transcript, false);

        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
        assert!(state.has_unseen_content());

        state.handle_event(&TuiEvent::ScrollDown);
        assert!(state.stick_to_bottom);
        assert!(!state.has_unseen_content());
    }

    #[test]
    fn clamp_keeps_offset_in_bounds() {
        let mut state = MessageListState::new();
        state.content_height = 20;
        state.viewport_height = 10;
        state.scroll_state.set_offset(Position { x: 0, y: 50 });
        state.clamp_scroll();
        assert_eq!(state.scroll_state.offset().y, 10);
    }

    #[test]
    fn test_layout_cache_reusable() {
        let mut cache = LayoutCache::new();
        cache.update_metadata(5, 80);
        cache.heights = vec![1; 5];

        // Same width: everything cached is reusable, new messages are measured
        assert_eq!(cache.reusable_count(5, 80), 5);
        assert_eq!(cache.reusable_count(6, 80), 5);

        // Width change invalidates everything
        assert_eq!(cache.reusable_count(5, 40), 0);

        // Fewer messages than cached means a different transcript
        assert_eq!(cache.reusable_count(3, 80), 0);
    }

    #[test]
    fn render_keeps_cached_heights_for_old_messages() {
        let mut state = MessageListState::new();
        let mut transcript = long_transcript();
        draw(&mut state, &transcript, false);
        assert_eq!(state.layout.heights.len(), transcript.len());

        // A sentinel survives the next frame only if the entry is reused
        state.layout.heights[0] = 7;
        transcript.push(Message::user("one more"));
        draw(&mut state, &transcript, false);

        assert_eq!(state.layout.heights.len(), transcript.len());
        assert_eq!(state.layout.heights[0], 7);
    }

    #[test]
    fn visible_range_skips_offscreen_messages() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![10; 100];
        cache.rebuild_prefix_heights();

        let range = cache.visible_range(0, 500, 10);
        assert!(range.start > 0 && range.end < 100, "{range:?}");
        assert!(range.contains(&50));
    }

    #[test]
    fn prefix_heights_do_not_overflow() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![u16::MAX; 4];
        cache.rebuild_prefix_heights();
        assert_eq!(cache.total_height(), 4 * u32::from(u16::MAX));
    }

    #[test]
    fn window_start_keeps_newest_messages() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![100; 10];
        cache.rebuild_prefix_heights();

        assert_eq!(cache.window_start(1000), 0);
        assert_eq!(cache.window_start(450), 6);
        // Newest message kept even when it alone exceeds the budget
        assert_eq!(cache.window_start(50), 9);
    }

    #[test]
    fn oversized_transcript_renders_within_canvas() {
        let mut state = MessageListState::new();
        let mut transcript = Transcript::new();
        transcript.push(Message::user("dump it"));
        transcript.push(Message::assistant("a\n".repeat(40_000)));
        transcript.push(Message::assistant("a\n".repeat(40_000)));

        let text = draw(&mut state, &transcript, true);

        assert!(state.content_height <= MAX_CANVAS_HEIGHT);
        assert!(text.contains("Searching…"));
        assert!(!state.has_unseen_content());
    }
}
