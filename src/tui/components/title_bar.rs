//! # TitleBar Component
//!
//! Top status bar showing the brand, active topic, the latest status note,
//! and the service connection indicator.
//!
//! ## Design Decisions
//!
//! TitleBar is purely presentational: it receives all data as props and has
//! no internal state.
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(
//!     app.active_topic,
//!     app.status_message.clone(),
//!     app.connection,
//!     !tui.message_list_state.is_pinned(),
//! );
//! title_bar.render(frame, area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Unseen content**: `"Campus Assistant | Academics | Email sent | ↓ New"`
//! 2. **Status message**: `"Campus Assistant | Academics | Email sent"`
//! 3. **Default**: `"Campus Assistant | Academics"`
//!
//! The connection indicator is right-aligned on the same line.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::client::ConnectionStatus;
use crate::core::topic::Topic;
use crate::tui::component::Component;

pub const BRAND: &str = "Campus Assistant";

/// Top status bar component.
///
/// # Props
///
/// - `topic`: The active topic
/// - `status_message`: Transient note (e.g. "Email sent", "Topic: Admissions")
/// - `connection`: Latest health probe outcome
/// - `has_unseen_content`: Whether the user scrolled away from the newest message
pub struct TitleBar {
    pub topic: Topic,
    pub status_message: String,
    pub connection: ConnectionStatus,
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(
        topic: Topic,
        status_message: String,
        connection: ConnectionStatus,
        has_unseen_content: bool,
    ) -> Self {
        Self {
            topic,
            status_message,
            connection,
            has_unseen_content,
        }
    }

    fn title_text(&self) -> String {
        let mut text = format!("{BRAND} | {}", self.topic.name());
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        if self.has_unseen_content {
            text.push_str(" | ↓ New");
        }
        text
    }

    fn connection_span(&self) -> Span<'static> {
        let (dot, color) = match self.connection {
            ConnectionStatus::Connected => ("●", Color::Green),
            ConnectionStatus::Offline => ("●", Color::Red),
            ConnectionStatus::Unknown => ("○", Color::DarkGray),
        };
        Span::styled(
            format!("{dot} {}", self.connection.label()),
            Style::default().fg(color),
        )
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let indicator = self.connection_span();
        let [left, right] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(indicator.width() as u16 + 1),
        ])
        .areas(area);

        frame.render_widget(Span::raw(self.title_text()), left);
        frame.render_widget(Line::from(indicator).right_aligned(), right);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(title_bar: &mut TitleBar) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                title_bar.render(f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_title_bar_with_unseen_content() {
        let mut title_bar = TitleBar::new(
            Topic::Academics,
            "Email sent".to_string(),
            ConnectionStatus::Connected,
            true,
        );
        let text = rendered(&mut title_bar);

        assert!(text.contains(BRAND));
        assert!(text.contains("Academics"));
        assert!(text.contains("Email sent"));
        assert!(text.contains("↓ New"));
        assert!(text.contains("Connected"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar =
            TitleBar::new(Topic::General, String::new(), ConnectionStatus::Unknown, false);
        let text = rendered(&mut title_bar);

        assert!(text.contains("Campus Assistant | General"));
        assert!(!text.contains("↓ New"));
        assert!(text.contains("Checking"));
    }

    #[test]
    fn test_title_bar_offline_indicator_is_red() {
        let title_bar =
            TitleBar::new(Topic::General, String::new(), ConnectionStatus::Offline, false);
        let span = title_bar.connection_span();
        assert_eq!(span.style.fg, Some(Color::Red));
        assert!(span.content.contains("Offline"));
    }
}
