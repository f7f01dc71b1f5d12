//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core `Action` values and performs the
//! `Effect`s the controller hands back.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Request Flow
//!
//! ```text
//! key ─▶ handle_event ─▶ controller.dispatch ─▶ Effect::SendChat
//!                                                   │
//!                                         tokio::spawn(send_chat)
//!                                                   │
//! draw ◀─ controller.dispatch ◀─ rx ◀─ Action::ReplyReceived
//! ```
//!
//! Every spawned request reports back exactly once: a watcher task awaits
//! the request's `JoinHandle` and turns a panicked or cancelled request into
//! an error action, so the loading flag always clears.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events, background
//!   actions, or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::client::{ChatBackend, ChatError, HealthMonitor, HttpBackend};
use crate::core::action::{Action, Effect};
use crate::core::config::ResolvedConfig;
use crate::core::controller::SessionController;
use crate::core::phrases::random_seed;
use crate::core::session::{FileSessionStore, MemorySessionStore, SessionStore};
use crate::core::topic::Topic;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    EmailModal, InputBox, InputEvent, LandingState, MessageListState, landing_prompts,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const LOADING_FRAME: Duration = Duration::from_millis(80);
const IDLE_FRAME: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub landing: LandingState,
}

impl TuiState {
    pub fn new(topic: Topic) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(topic),
            landing: LandingState::default(),
        }
    }

    /// Forget per-conversation view state after a topic switch or new chat.
    fn reset_conversation_view(&mut self) {
        self.message_list = MessageListState::new();
        self.landing.reset();
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Hide);
    }
}

/// Opens the session store selected by the config. `--fresh` clears it first.
pub fn open_store(config: &ResolvedConfig) -> Box<dyn SessionStore> {
    let mut store: Box<dyn SessionStore> = if config.ephemeral {
        info!("Using in-memory session store");
        Box::new(MemorySessionStore::default())
    } else {
        match FileSessionStore::for_current_session(&config.session_dir) {
            Ok(store) => {
                info!("Session file: {}", store.path().display());
                Box::new(store)
            }
            Err(e) => {
                warn!(
                    "Cannot use session dir {}: {}; keeping this conversation in memory",
                    config.session_dir.display(),
                    e
                );
                Box::new(MemorySessionStore::default())
            }
        }
    };

    if config.fresh
        && let Err(e) = store.clear()
    {
        warn!("Failed to clear stored session: {}", e);
    }
    store
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend: Arc<dyn ChatBackend> = Arc::new(
        HttpBackend::new(config.api_base_url.clone())
            .with_health_timeout(Duration::from_secs(config.health_timeout_secs)),
    );
    info!("Using backend {}", backend.name());

    let mut controller = SessionController::new(open_store(&config), random_seed());
    if let Some(topic) = config.start_topic
        && topic != controller.app().active_topic
    {
        controller.switch_topic(topic);
    }

    let mut tui = TuiState::new(controller.app().active_topic);
    tui.input_box.sync(&controller.app().draft_input);

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let health_tx = tx.clone();
    let _health_monitor = HealthMonitor::spawn(
        backend.clone(),
        Duration::from_secs(config.health_interval_secs),
        move |status| {
            if health_tx.send(Action::HealthChecked(status)).is_err() {
                debug!("Health status dropped: receiver gone");
            }
        },
    );

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let app = controller.app();
        tui.input_box.topic = app.active_topic;
        tui.input_box.waiting = app.is_loading;

        if app.is_loading {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if app.is_loading { LOADING_FRAME } else { IDLE_FRAME };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let effect = handle_event(event, &mut controller, &mut tui);
            should_quit |= perform(effect, &backend, &tx);
        }

        // Handle background task actions (replies, mail results, health)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = controller.dispatch(action);
            should_quit |= perform(effect, &backend, &tx);
        }
        tui.input_box.sync(&controller.app().draft_input);

        if should_quit {
            break;
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

/// Performs an effect. Returns true when the app should quit.
fn perform(effect: Effect, backend: &Arc<dyn ChatBackend>, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::SendChat { topic, message } => {
            spawn_chat_request(backend.clone(), topic, message, tx.clone());
            false
        }
        Effect::SendMail { message, email } => {
            spawn_mail_request(backend.clone(), message, email, tx.clone());
            false
        }
    }
}

/// Routes one terminal event. Returns the effect the caller must perform.
pub fn handle_event<S: SessionStore>(
    event: TuiEvent,
    controller: &mut SessionController<S>,
    tui: &mut TuiState,
) -> Effect {
    let effect = route_event(event, controller, tui);
    tui.input_box.sync(&controller.app().draft_input);
    effect
}

fn route_event<S: SessionStore>(
    event: TuiEvent,
    controller: &mut SessionController<S>,
    tui: &mut TuiState,
) -> Effect {
    if matches!(event, TuiEvent::Resize) {
        return Effect::None;
    }

    // Ctrl+C always quits, modal or not
    if matches!(event, TuiEvent::ForceQuit) {
        return controller.dispatch(Action::Quit);
    }

    // When the email modal is open, it gets every event
    let modal_action = controller
        .app()
        .email_draft
        .as_ref()
        .map(|draft| EmailModal::new(draft).handle_event(&event));
    if let Some(action) = modal_action {
        return action.map_or(Effect::None, |a| controller.dispatch(a));
    }

    let app = controller.app();
    let on_landing = app.messages.is_empty() && !app.is_loading;
    let topic = app.active_topic;

    match event {
        TuiEvent::Escape => controller.dispatch(Action::Quit),
        TuiEvent::NextTopic | TuiEvent::PrevTopic => {
            let next = if event == TuiEvent::NextTopic {
                topic.next()
            } else {
                topic.prev()
            };
            controller.switch_topic(next);
            tui.reset_conversation_view();
            Effect::None
        }
        TuiEvent::NewChat => {
            controller.start_new_chat();
            tui.reset_conversation_view();
            Effect::None
        }
        TuiEvent::EmailReply => match controller.app().last_bot_message() {
            Some(message) => {
                let text = message.text.clone();
                controller.dispatch(Action::OpenEmail(text))
            }
            None => {
                debug!("Email requested with no reply to send");
                Effect::None
            }
        },
        TuiEvent::Up if on_landing => {
            tui.landing.select_prev(landing_prompts(topic).len());
            Effect::None
        }
        TuiEvent::Down if on_landing => {
            tui.landing.select_next(landing_prompts(topic).len());
            Effect::None
        }
        TuiEvent::Up | TuiEvent::Down | TuiEvent::ScrollPageUp | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(&event);
            Effect::None
        }
        TuiEvent::Submit
            if on_landing
                && controller.app().draft_input.trim().is_empty()
                && tui.landing.selected.is_some() =>
        {
            match tui.landing.selected_query(topic) {
                Some(query) => controller.dispatch(Action::DraftChanged(query.to_string())),
                None => Effect::None,
            }
        }
        _ => match tui.input_box.handle_event(&event) {
            Some(InputEvent::Submit(text)) => {
                let effect = controller.dispatch(Action::Submit(text));
                if matches!(effect, Effect::SendChat { .. }) {
                    tui.message_list.pin_to_bottom();
                    tui.landing.reset();
                }
                effect
            }
            Some(InputEvent::Changed(text)) => controller.dispatch(Action::DraftChanged(text)),
            Some(InputEvent::CursorMoved) | None => Effect::None,
        },
    }
}

fn spawn_chat_request(
    backend: Arc<dyn ChatBackend>,
    topic: Topic,
    message: String,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning chat request (topic={})", topic.id());
    let request = tokio::spawn(async move { backend.send_chat(topic, &message).await });

    tokio::spawn(async move {
        let result = match request.await {
            Ok(result) => result,
            Err(e) => {
                warn!("Chat request task failed: {}", e);
                Err(ChatError::Unknown(e.to_string()))
            }
        };
        if tx.send(Action::ReplyReceived(result)).is_err() {
            warn!("Failed to deliver chat reply: receiver dropped");
        }
    });
}

fn spawn_mail_request(
    backend: Arc<dyn ChatBackend>,
    message: String,
    email: String,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning mail request");
    let request = tokio::spawn(async move { backend.send_mail(&message, &email).await });

    tokio::spawn(async move {
        let result = match request.await {
            Ok(result) => result,
            Err(e) => {
                warn!("Mail request task failed: {}", e);
                Err(ChatError::Unknown(e.to_string()))
            }
        };
        if tx.send(Action::EmailResult(result)).is_err() {
            warn!("Failed to deliver mail result: receiver dropped");
        }
    });
}
