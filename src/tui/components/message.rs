use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Text;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::action::FAILURE_PLACEHOLDER;
use crate::core::message::{Message, Origin};
use crate::tui::markdown;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Narrowest bubble, so short answers like "4" still show their title.
const MIN_BUBBLE_WIDTH: u16 = 12;

/// A single transcript entry rendered as a chat bubble.
///
/// User questions sit on the right and never take more than four fifths of
/// the row; answers sit on the left and may use the full width. Both shrink
/// to fit short content.
///
/// Built fresh each frame. Construction renders the markdown once and measures
/// it, so the parent `MessageList` can lay out the scroll canvas before drawing.
pub struct MessageView<'a> {
    pub message: &'a Message,
    text: Text<'static>,
    bubble_width: u16,
    height: u16,
}

impl<'a> MessageView<'a> {
    pub fn new(message: &'a Message, row_width: u16) -> Self {
        let style = message_style(message);
        let fg = style.fg.unwrap_or(Color::Reset);
        let text = markdown::render(message.text.trim_end(), fg);

        let max_width = match message.origin {
            Origin::User => (row_width.saturating_mul(4) / 5).max(MIN_BUBBLE_WIDTH),
            Origin::Assistant => row_width,
        }
        .min(row_width);

        let natural = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(HORIZONTAL_OVERHEAD);
        let bubble_width = natural.max(MIN_BUBBLE_WIDTH).min(max_width);

        let height = Self::measure(&text, bubble_width);

        Self {
            message,
            text,
            bubble_width,
            height,
        }
    }

    /// Rows needed to draw the bubble, borders included.
    pub fn height(&self) -> u16 {
        self.height
    }

    fn measure(text: &Text<'static>, bubble_width: u16) -> u16 {
        let content_width = bubble_width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding; still occupy a row
            return 1;
        }
        let lines = Paragraph::new(text.clone())
            .wrap(Wrap { trim: false })
            .line_count(content_width);
        u16::try_from(lines)
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }

    fn bubble_area(&self, area: Rect) -> Rect {
        let width = self.bubble_width.min(area.width);
        let x = match self.message.origin {
            Origin::User => area.x + area.width - width,
            Origin::Assistant => area.x,
        };
        Rect::new(x, area.y, width, area.height.min(self.height))
    }
}

impl Widget for MessageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = message_style(self.message);
        let bubble = self.bubble_area(area);

        let block = Block::bordered()
            .title(origin_label(self.message.origin))
            .border_type(BorderType::Rounded)
            .border_style(style.add_modifier(Modifier::DIM))
            .title_style(style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(bubble);
        block.render(bubble, buf);

        Paragraph::new(self.text)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

fn origin_label(origin: Origin) -> &'static str {
    match origin {
        Origin::User => "you",
        Origin::Assistant => "scout",
    }
}

fn message_style(message: &Message) -> Style {
    match message.origin {
        Origin::User => Style::default().fg(Color::Cyan),
        Origin::Assistant if message.text == FAILURE_PLACEHOLDER => {
            Style::default().fg(Color::Red)
        }
        Origin::Assistant => Style::default().fg(Color::Gray),
    }
}
