//! # Email Modal Component
//!
//! Overlay for emailing a bot reply. Opened with Ctrl+E on the latest reply.
//!
//! The draft itself lives in core state (`App::email_draft`); `EmailModal`
//! is a transient wrapper created per frame or per event. Its events are
//! core actions, so the caller dispatches them directly.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

use crate::core::action::Action;
use crate::core::email::{EmailDraft, EmailValidity};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const MODAL_HEIGHT: u16 = 12;
const PREVIEW_LINES: u16 = 3;

pub struct EmailModal<'a> {
    pub draft: &'a EmailDraft,
}

impl<'a> EmailModal<'a> {
    pub fn new(draft: &'a EmailDraft) -> Self {
        Self { draft }
    }

    fn field_style(&self) -> Style {
        match self.draft.validity {
            EmailValidity::Neutral => Style::default().fg(Color::DarkGray),
            EmailValidity::Invalid => Style::default().fg(Color::Red),
            EmailValidity::Valid => Style::default().fg(Color::Green),
        }
    }

    fn hint(&self) -> (&'static str, Style) {
        if self.draft.sending {
            return (
                "Sending...",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            );
        }
        match self.draft.validity {
            EmailValidity::Neutral => ("Enter the recipient's email address", Style::default().fg(Color::DarkGray)),
            EmailValidity::Invalid => ("That doesn't look like an email address", Style::default().fg(Color::Red)),
            EmailValidity::Valid => ("Press Enter to send", Style::default().fg(Color::Green)),
        }
    }
}

impl<'a> EventHandler for EmailModal<'a> {
    type Event = Action;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Action> {
        let recipient = &self.draft.recipient_email;
        match event {
            TuiEvent::Escape => Some(Action::CloseEmail),
            TuiEvent::Submit => Some(Action::SubmitEmail),
            TuiEvent::InputChar('\n') => None,
            TuiEvent::InputChar(c) => Some(Action::EmailInput(format!("{recipient}{c}"))),
            TuiEvent::Paste(text) => {
                let pasted: String = text.chars().filter(|c| !c.is_control()).collect();
                Some(Action::EmailInput(format!("{recipient}{pasted}")))
            }
            TuiEvent::Backspace => {
                let mut next = recipient.clone();
                next.pop().map(|_| Action::EmailInput(next))
            }
            _ => None,
        }
    }
}

impl<'a> Component for EmailModal<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, MODAL_HEIGHT, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Email this reply ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Send  Esc Cancel ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [preview, _, field, hint] = Layout::vertical([
            Constraint::Length(PREVIEW_LINES),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new(self.draft.target_message_text.as_str())
                .style(Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC))
                .wrap(Wrap { trim: true }),
            preview,
        );

        let field_block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.field_style())
            .title(" To ");
        let field_inner = field_block.inner(field);
        frame.render_widget(
            Paragraph::new(self.draft.recipient_email.as_str()).block(field_block),
            field,
        );

        let (hint_text, hint_style) = self.hint();
        frame.render_widget(Paragraph::new(hint_text).style(hint_style), hint);

        let cursor_x = field_inner.x
            + (unicode_width::UnicodeWidthStr::width(self.draft.recipient_email.as_str()) as u16)
                .min(field_inner.width.saturating_sub(1));
        frame.set_cursor_position((cursor_x, field_inner.y));
    }
}

/// Centered rect: `percent_x` of the outer width, `height` rows tall.
fn centered_rect(percent_x: u16, height: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(outer.height)),
        Constraint::Fill(1),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
