use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    EmailModal, LandingPage, MessageList, SIDEBAR_WIDTH, Sidebar, TitleBar,
};

/// Below this width the sidebar is hidden.
pub const SIDEBAR_MIN_TOTAL_WIDTH: u16 = 72;

/// Split the frame into (title, sidebar, conversation, input) areas.
pub fn layout_areas(area: Rect, input_height: u16) -> (Rect, Option<Rect>, Rect, Rect) {
    use Constraint::{Length, Min};

    let [title_area, body] = Layout::vertical([Length(1), Min(0)]).areas(area);

    let (sidebar_area, main_area) = if area.width >= SIDEBAR_MIN_TOTAL_WIDTH {
        let [side, main] = Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(body);
        (Some(side), main)
    } else {
        (None, body)
    };

    let [conversation_area, input_area] =
        Layout::vertical([Min(0), Length(input_height)]).areas(main_area);

    (title_area, sidebar_area, conversation_area, input_area)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let area = frame.area();
    let input_width = if area.width >= SIDEBAR_MIN_TOTAL_WIDTH {
        area.width.saturating_sub(SIDEBAR_WIDTH)
    } else {
        area.width
    };
    let input_height = tui.input_box.calculate_height(input_width);
    let (title_area, sidebar_area, conversation_area, input_area) =
        layout_areas(area, input_height);

    let showing_landing = app.messages.is_empty() && !app.is_loading;

    let mut title_bar = TitleBar::new(
        app.active_topic,
        app.status_message.clone(),
        app.connection,
        !showing_landing && !tui.message_list.is_pinned(),
    );
    title_bar.render(frame, title_area);

    if let Some(sidebar_area) = sidebar_area {
        Sidebar::new(app.active_topic).render(frame, sidebar_area);
    }

    if showing_landing {
        LandingPage::new(&app.greeting, app.active_topic, tui.landing.selected)
            .render(frame, conversation_area);
    } else {
        MessageList::new(
            &mut tui.message_list,
            &app.messages,
            app.is_loading,
            &app.loading_phrase,
            spinner_frame,
        )
        .render(frame, conversation_area);
    }

    tui.input_box.render(frame, input_area);

    // Drawn last so it sits on top and owns the cursor
    if let Some(draft) = &app.email_draft {
        EmailModal::new(draft).render(frame, area);
    }
}
