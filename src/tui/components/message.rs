use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::message::{Message as ChatMessage, Source};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
pub(super) const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
pub(super) const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders a single chat message with sender-based styling.
///
/// `Message` is created fresh each frame by `MessageList`. The border title
/// carries the sender label and the local `HH:MM` the message was stamped at.
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height
/// with `textwrap` options that match the `Paragraph` wrapping, so the list
/// can lay out the conversation without rendering it first.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a ChatMessage,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a ChatMessage) -> Self {
        Self { message }
    }

    /// Calculate the height required for this message given a width.
    pub fn calculate_height(message: &ChatMessage, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still occupy a row.
            return 1;
        }

        let content = message.text.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }

    fn title(&self) -> String {
        let who = sender_label(self.message.sender);
        match format_clock(&self.message.timestamp) {
            Some(clock) => format!(" {who} · {clock} "),
            None => format!(" {who} "),
        }
    }
}

pub fn sender_label(sender: Source) -> &'static str {
    match sender {
        Source::User => "You",
        Source::Bot => "Assistant",
    }
}

pub fn sender_style(sender: Source) -> Style {
    match sender {
        Source::User => Style::default().fg(Color::Green),
        Source::Bot => Style::default().fg(Color::Blue),
    }
}

/// Local wall-clock `HH:MM` for an RFC 3339 timestamp.
pub fn format_clock(timestamp: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|t| t.with_timezone(&Local).format("%H:%M").to_string())
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = sender_style(self.message.sender);
        let border_style = style.add_modifier(Modifier::DIM);

        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));
        // User messages are titled on the right, replies on the left
        block = match self.message.sender {
            Source::User => block.title(Line::from(self.title()).right_aligned()),
            Source::Bot => block.title(self.title()),
        };

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.message.text.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
