//! # InputBox Component
//!
//! The message composer at the bottom of the screen.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, Ctrl+J newlines)
//! - Handle editing (backspace, cursor movement)
//! - Emit the whole draft on every change so the core state owns it
//! - Emit a submit request on Enter
//!
//! ## State Management
//!
//! The buffer mirrors `App::draft_input`. The component edits its copy and
//! reports `Changed`; the owner calls [`InputBox::sync`] after each dispatch
//! so clears done by the reducer (after a send, on topic switch) show up.
//! The topic and loading flag are props.

mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::topic::Topic;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use text_wrap::{
    CONTENT_OFFSET, MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, cursor_row_col, inner_width,
    next_char_boundary, prev_char_boundary, wrap_line_count, wrap_lines,
};

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User pressed Enter. Carries the draft as typed.
    Submit(String),
    /// Draft text changed.
    Changed(String),
    /// Cursor moved without changing the text.
    CursorMoved,
}

/// Text input component.
///
/// # Props
///
/// - `topic`: Active topic, shown in the title and placeholder
/// - `waiting`: A reply is pending
///
/// # State
///
/// - `buffer`: Current draft
/// - `pos`: Cursor byte offset into `buffer`
pub struct InputBox {
    pub buffer: String,
    pub topic: Topic,
    pub waiting: bool,
    pos: usize,
}

impl InputBox {
    pub fn new(topic: Topic) -> Self {
        Self {
            buffer: String::new(),
            topic,
            waiting: false,
            pos: 0,
        }
    }

    /// Adopt `draft` when it differs from the buffer, moving the cursor to the end.
    pub fn sync(&mut self, draft: &str) {
        if self.buffer != draft {
            self.buffer = draft.to_string();
            self.pos = self.buffer.len();
        }
    }

    /// Calculate required height for current buffer content, clamped to viewport limits.
    /// Returns value in range [1 + VERTICAL_OVERHEAD, MAX_VISIBLE_LINES + VERTICAL_OVERHEAD].
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        let content_lines = wrap_line_count(&self.buffer, width);
        content_lines.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn title(&self) -> String {
        if self.waiting {
            format!(" {} · waiting for reply ", self.topic.name())
        } else {
            format!(" {} ", self.topic.name())
        }
    }

    fn placeholder(&self) -> String {
        format!("Ask the {} assistant...", self.topic.name())
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(self.title())
            .title_bottom(Line::from(" Enter send · Ctrl+J newline ").right_aligned())
            .padding(ratatui::widgets::Padding::horizontal(1));

        if self.buffer.is_empty() {
            let hint = Paragraph::new(self.placeholder())
                .block(block)
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC));
            frame.render_widget(hint, area);
            frame.set_cursor_position((area.x + CONTENT_OFFSET, area.y + 1));
            return;
        }

        let width = inner_width(area.width);
        let lines = wrap_lines(&self.buffer, width);
        let (row, col) = cursor_row_col(&self.buffer, self.pos, width);

        // Keep the cursor row inside the visible window.
        let visible = area.height.saturating_sub(VERTICAL_OVERHEAD).max(1);
        let first = row.saturating_sub(visible - 1);
        let shown: Vec<Line> = lines
            .into_iter()
            .skip(first as usize)
            .take(visible as usize)
            .map(Line::from)
            .collect();

        let input = Paragraph::new(shown)
            .block(block)
            .style(Style::default().fg(Color::Green));
        frame.render_widget(input, area);

        frame.set_cursor_position((
            area.x + CONTENT_OFFSET + col,
            area.y + 1 + (row - first),
        ));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.pos, *c);
                self.pos += c.len_utf8();
                Some(InputEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Paste(text) => {
                // Normalize CRLF from some terminals
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.buffer.insert_str(self.pos, &text);
                self.pos += text.len();
                Some(InputEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Backspace => {
                if self.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.pos);
                self.buffer.drain(prev..self.pos);
                self.pos = prev;
                Some(InputEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::CursorLeft => (self.pos > 0).then(|| {
                self.pos = prev_char_boundary(&self.buffer, self.pos);
                InputEvent::CursorMoved
            }),
            TuiEvent::CursorRight => (self.pos < self.buffer.len()).then(|| {
                self.pos = next_char_boundary(&self.buffer, self.pos);
                InputEvent::CursorMoved
            }),
            TuiEvent::Submit => Some(InputEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}
