//! # MessageList Component
//!
//! Scrollable view of the conversation.
//!
//! ## Responsibilities
//!
//! - Lay out messages using predicted heights
//! - Show the loading phrase below the latest entry while a reply is pending
//! - Keep the view pinned to the newest message unless the user scrolled up
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the messages (props).
//! Visible messages are rendered into an off-screen buffer and the rows
//! inside the viewport are copied onto the frame, so partially visible
//! messages keep their borders.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Widget};

use crate::core::message::Message as ChatMessage;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Scroll state for the message list. Persisted in the parent TuiState.
#[derive(Debug, Default)]
pub struct MessageListState {
    /// Rows scrolled up from the newest content; 0 means pinned to bottom
    pub scroll_from_bottom: u16,
    /// Last known viewport height (page size for PageUp/PageDown)
    pub viewport_height: u16,
    /// Largest valid `scroll_from_bottom` as of the last render
    pub max_scroll: u16,
}

impl MessageListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pinned(&self) -> bool {
        self.scroll_from_bottom == 0
    }

    /// Jump back to the newest content.
    pub fn pin_to_bottom(&mut self) {
        self.scroll_from_bottom = 0;
    }

    fn scroll_up(&mut self, rows: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(rows).min(self.max_scroll);
    }

    fn scroll_down(&mut self, rows: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(rows);
    }

    fn page(&self) -> u16 {
        self.viewport_height.saturating_sub(2).max(1)
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Up => self.scroll_up(1),
            TuiEvent::Down => self.scroll_down(1),
            TuiEvent::ScrollPageUp => self.scroll_up(self.page()),
            TuiEvent::ScrollPageDown => self.scroll_down(self.page()),
            _ => {}
        }
        None
    }
}

/// One laid-out row band: a message or the loading line.
enum Item<'a> {
    Message(&'a ChatMessage),
    Loading,
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [ChatMessage],
    pub is_loading: bool,
    pub loading_phrase: &'a str,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [ChatMessage],
        is_loading: bool,
        loading_phrase: &'a str,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            messages,
            is_loading,
            loading_phrase,
            spinner_frame,
        }
    }

    fn loading_line(&self) -> String {
        let frame = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
        format!("{frame} {}", self.loading_phrase)
    }

    /// (item, top, height) for every entry, in conversation order.
    fn layout(&self, width: u16) -> (Vec<(Item<'a>, u16, u16)>, u16) {
        let mut items = Vec::with_capacity(self.messages.len() + 1);
        let mut y: u16 = 0;
        for message in self.messages {
            let height = Message::calculate_height(message, width);
            items.push((Item::Message(message), y, height));
            y = y.saturating_add(height);
        }
        if self.is_loading {
            items.push((Item::Loading, y, 1));
            y = y.saturating_add(1);
        }
        (items, y)
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.width < 2 || area.height == 0 {
            return;
        }
        let content_width = area.width - 1; // scrollbar column
        let (items, total_height) = self.layout(content_width);

        self.state.viewport_height = area.height;
        self.state.max_scroll = total_height.saturating_sub(area.height);
        self.state.scroll_from_bottom = self.state.scroll_from_bottom.min(self.state.max_scroll);
        let top = self.state.max_scroll - self.state.scroll_from_bottom;
        let bottom = top.saturating_add(area.height);

        let visible: Vec<&(Item, u16, u16)> = items
            .iter()
            .filter(|(_, y, h)| y.saturating_add(*h) > top && *y < bottom)
            .collect();
        let (Some(first), Some(last)) = (visible.first(), visible.last()) else {
            return;
        };
        let canvas_top = first.1;
        let canvas_height = last.1.saturating_add(last.2) - canvas_top;
        let mut canvas = Buffer::empty(Rect::new(0, 0, content_width, canvas_height));

        for (item, y, height) in &visible {
            let rect = Rect::new(0, y - canvas_top, content_width, *height);
            match item {
                Item::Message(message) => Message::new(message).render(rect, &mut canvas),
                Item::Loading => Paragraph::new(self.loading_line())
                    .style(
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::ITALIC),
                    )
                    .render(rect, &mut canvas),
            }
        }

        // Copy the rows inside the viewport onto the frame
        let buf = frame.buffer_mut();
        for row in 0..area.height {
            let Some(canvas_row) = (top + row).checked_sub(canvas_top) else {
                continue;
            };
            if canvas_row >= canvas_height {
                break;
            }
            for col in 0..content_width {
                if let (Some(src), Some(dst)) = (
                    canvas.cell((col, canvas_row)),
                    buf.cell_mut((area.x + col, area.y + row)),
                ) {
                    *dst = src.clone();
                }
            }
        }

        if self.state.max_scroll > 0 {
            let mut scrollbar_state = ScrollbarState::default()
                .content_length(self.state.max_scroll as usize)
                .position(top as usize);
            let scrollbar_area = Rect {
                x: area.x + content_width,
                y: area.y,
                width: 1,
                height: area.height,
            };
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                scrollbar_area,
                &mut scrollbar_state,
            );
        }
    }
}
