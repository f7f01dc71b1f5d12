//! # Landing Page Component
//!
//! Shown while the conversation is empty: the greeting, the quick actions,
//! and the active topic's suggested prompts. One prompt can be highlighted
//! with Up/Down; Enter on an empty input loads it into the input box.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::phrases::QUICK_ACTIONS;
use crate::core::topic::Topic;
use crate::tui::component::Component;

/// A selectable landing entry. Quick actions show a short label;
/// topic suggestions are their own label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandingPrompt {
    pub label: &'static str,
    pub query: &'static str,
}

/// Quick actions followed by the topic's suggested prompts, in display order.
pub fn landing_prompts(topic: Topic) -> Vec<LandingPrompt> {
    QUICK_ACTIONS
        .iter()
        .map(|a| LandingPrompt {
            label: a.label,
            query: a.query,
        })
        .chain(topic.suggested_prompts().iter().map(|p| LandingPrompt {
            label: *p,
            query: *p,
        }))
        .collect()
}

/// Highlight state for the landing prompts. Lives in TuiState.
#[derive(Debug, Default)]
pub struct LandingState {
    pub selected: Option<usize>,
}

impl LandingState {
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % len,
            None => 0,
        });
    }

    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        });
    }

    /// The highlighted prompt's query for `topic`, if any.
    pub fn selected_query(&self, topic: Topic) -> Option<&'static str> {
        let prompts = landing_prompts(topic);
        self.selected
            .and_then(|i| prompts.get(i))
            .map(|p| p.query)
    }

    pub fn reset(&mut self) {
        self.selected = None;
    }
}

pub struct LandingPage<'a> {
    pub greeting: &'a str,
    pub topic: Topic,
    pub selected: Option<usize>,
}

impl<'a> LandingPage<'a> {
    pub fn new(greeting: &'a str, topic: Topic, selected: Option<usize>) -> Self {
        Self {
            greeting,
            topic,
            selected,
        }
    }

    fn prompt_line(&self, index: usize, prompt: &LandingPrompt, show_query: bool) -> Line<'static> {
        let highlighted = self.selected == Some(index);
        let marker = if highlighted { "› " } else { "  " };
        let style = if highlighted {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Cyan)
        };

        let mut spans = vec![Span::styled(format!("{marker}{}", prompt.label), style)];
        if show_query {
            spans.push(Span::styled(
                format!("  {}", prompt.query),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let heading = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        let prompts = landing_prompts(self.topic);
        let (quick, suggested) = prompts.split_at(QUICK_ACTIONS.len());

        let mut lines = vec![
            Line::from(Span::styled(
                self.greeting.to_string(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{} · {}", self.topic.name(), self.topic.description()),
                Style::default().fg(Color::DarkGray),
            )),
            Line::default(),
            Line::from(Span::styled("Quick actions", heading)),
        ];
        lines.extend(
            quick
                .iter()
                .enumerate()
                .map(|(i, p)| self.prompt_line(i, p, true)),
        );
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("Try asking about {}", self.topic.name()),
            heading,
        )));
        lines.extend(
            suggested
                .iter()
                .enumerate()
                .map(|(i, p)| self.prompt_line(quick.len() + i, p, false)),
        );
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "↑/↓ choose a prompt · Enter to use it",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
        lines
    }
}

impl<'a> Component for LandingPage<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        let height = lines.len() as u16;
        let width = lines.iter().map(|l| l.width() as u16).max().unwrap_or(0);

        let [row] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [column] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(row);

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(page: &mut LandingPage, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                page.render(f, area);
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
    fn prompts_are_quick_actions_then_topic_suggestions() {
        let prompts = landing_prompts(Topic::Navigation);
        assert_eq!(prompts.len(), QUICK_ACTIONS.len() + 3);
        assert_eq!(prompts[0].query, QUICK_ACTIONS[0].query);
        assert_eq!(prompts[QUICK_ACTIONS.len()].query, "Where is the library?");
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut state = LandingState::default();
        state.select_prev(4);
        assert_eq!(state.selected, Some(3));
        state.select_next(4);
        assert_eq!(state.selected, Some(0));
        state.select_next(4);
        assert_eq!(state.selected, Some(1));
    }

    #[test]
    fn selection_ignores_empty_list() {
        let mut state = LandingState::default();
        state.select_next(0);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn selected_query_follows_topic() {
        let state = LandingState {
            selected: Some(QUICK_ACTIONS.len()),
        };
        assert_eq!(state.selected_query(Topic::Admissions), Some("Admission process overview"));
        assert_eq!(state.selected_query(Topic::Academics), Some("Available B.Tech programs?"));
        assert_eq!(LandingState::default().selected_query(Topic::General), None);
    }

    #[test]
    fn render_shows_greeting_and_prompts() {
        let mut page = LandingPage::new("Hi! I'm here to help", Topic::Academics, None);
        let text = rendered(&mut page, 100, 30);

        assert!(text.contains("Hi! I'm here to help"));
        assert!(text.contains("Campus tour"));
        assert!(text.contains("Try asking about Academics"));
        assert!(text.contains("Faculty qualifications"));
    }

    #[test]
    fn render_marks_highlighted_prompt() {
        let mut page = LandingPage::new("Hey!", Topic::General, Some(1));
        let text = rendered(&mut page, 100, 30);
        assert!(text.contains("› Food spots"));
    }
}
