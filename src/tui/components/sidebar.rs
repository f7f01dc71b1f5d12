//! # Sidebar Component
//!
//! Topic list with a "New Chat" entry on top. Tab / Shift+Tab cycle the
//! topics, Ctrl+N starts a new chat. Hidden on narrow terminals.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::core::topic::Topic;
use crate::tui::component::Component;

pub const SIDEBAR_WIDTH: u16 = 26;

pub struct Sidebar {
    pub active: Topic,
}

impl Sidebar {
    pub fn new(active: Topic) -> Self {
        Self { active }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "+ New Chat",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("  Ctrl+N", Style::default().fg(Color::DarkGray))),
            Line::default(),
        ];

        for topic in Topic::ALL {
            let active = topic == self.active;
            let (marker, name_style) = if active {
                ("› ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            } else {
                ("  ", Style::default().fg(Color::Gray))
            };
            lines.push(Line::from(Span::styled(
                format!("{marker}{}", topic.name()),
                name_style,
            )));
            lines.push(Line::from(Span::styled(
                format!("  {}", topic.description()),
                Style::default().fg(Color::DarkGray),
            )));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Tab / Shift+Tab",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
        lines
    }
}

impl Component for Sidebar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Topics ")
            .padding(Padding::horizontal(1));

        frame.render_widget(Paragraph::new(self.lines()).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn render_lists_every_topic_and_marks_active() {
        let mut terminal = Terminal::new(TestBackend::new(SIDEBAR_WIDTH, 20)).unwrap();
        let mut sidebar = Sidebar::new(Topic::Admissions);
        terminal
            .draw(|f| {
                let area = f.area();
                sidebar.render(f, area);
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();

        assert!(text.contains("New Chat"));
        for topic in Topic::ALL {
            assert!(text.contains(topic.name()), "missing {}", topic.name());
        }
        assert!(text.contains("› Admissions"));
        assert!(!text.contains("› General"));
    }
}
