//! App — component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (which holds the Controller).
//! - Network calls run on spawned tasks and report back as `AppMessage`s
//!   over a `tokio::mpsc` channel, so every state change happens on this loop.
//! - The event loop draws a frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.

use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Paragraph, Wrap},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use unicode_width::UnicodeWidthStr;

use moodmix_proto::{Backend, Mood, RecommendOutcome, SessionCheck};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::{
        header::Header, help_overlay::HelpOverlay, login_panel::LoginPanel,
        mood_picker::MoodPicker, song_list::SongList,
    },
    controller::{RequestTicket, SessionTicket, View},
    focus::FocusRing,
    theme::{style_error, C_BG, C_LOADING},
    widgets::{
        spinner::spinner_line,
        status_bar::{draw_keys_bar, draw_separator},
    },
};

pub const LOADING_TEXT: &str = "Finding songs based on your taste...";

/// Server messages longer than this are clipped.
const MAX_ERROR_ROWS: u16 = 6;

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    SessionChecked(SessionTicket, SessionCheck),
    RecommendationSettled(RequestTicket, RecommendOutcome),
}

// ── Pane area tracking ────────────────────────────────────────────────────────

/// Last-drawn rects of the mouse-aware panes. Zero-sized when hidden.
#[derive(Default, Clone, Copy)]
struct PaneAreas {
    mood_picker: Rect,
    song_list: Rect,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    pub state: AppState,
    backend: Backend,
    /// URL the login flow redirected back to, re-read on every reload.
    launch_url: Option<String>,

    // ── Components ────────────────────────────────────────────────────────────
    header: Header,
    login_panel: LoginPanel,
    mood_picker: MoodPicker,
    song_list: SongList,
    help_overlay: HelpOverlay,
    focus: FocusRing,

    tx: mpsc::Sender<AppMessage>,
    rx: Option<mpsc::Receiver<AppMessage>>,
    should_quit: bool,
    pane_areas: PaneAreas,
}

impl App {
    pub fn new(backend: Backend, launch_url: Option<String>, placeholder_image: String) -> Self {
        let (tx, rx) = mpsc::channel::<AppMessage>(256);
        let state = AppState::new(backend.login_url(), placeholder_image);
        Self {
            state,
            backend,
            launch_url,
            header: Header::new(),
            login_panel: LoginPanel::new(),
            mood_picker: MoodPicker::new(),
            song_list: SongList::new(),
            help_overlay: HelpOverlay::new(),
            focus: FocusRing::new(vec![ComponentId::MoodPicker, ComponentId::SongList]),
            tx,
            rx: Some(rx),
            should_quit: false,
            pane_areas: PaneAreas::default(),
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        let Some(mut rx) = self.rx.take() else {
            anyhow::bail!("App::run called more than once");
        };

        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = self.tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        self.initialize();

        let result = self.main_loop(&mut terminal, &mut rx).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        info!("moodmix exiting");
        result
    }

    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        rx: &mut mpsc::Receiver<AppMessage>,
    ) -> anyhow::Result<()> {
        // Spinner animation: only redraws while a request is in flight.
        let mut spinner_tick = tokio::time::interval(Duration::from_millis(100));
        spinner_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                msg = rx.recv() => match msg {
                    Some(msg) => needs_redraw = self.handle_message(msg),
                    None => break,
                },
                _ = spinner_tick.tick() => {
                    if self.state.controller.is_in_flight() {
                        self.state.spinner_frame = self.state.spinner_frame.wrapping_add(1);
                        needs_redraw = true;
                    }
                }
            }
        }
        Ok(())
    }

    // ── Controller operations ─────────────────────────────────────────────────

    /// Startup: read the redirect fragment and ask the backend who we are.
    /// The two are independent; the session answer lands later as a message.
    fn initialize(&mut self) {
        if let Some(launch_url) = self.launch_url.as_deref() {
            self.state.controller.apply_redirect(launch_url);
        }

        let ticket = self.state.controller.begin_session_check();
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let check = backend.check_session().await;
            let _ = tx.send(AppMessage::SessionChecked(ticket, check)).await;
        });
    }

    fn request_recommendation(&mut self, mood: Mood) {
        let Some(ticket) = self.state.controller.begin_recommendation(mood) else {
            info!("mood {} picked without a session", mood);
            return;
        };

        let backend = self.backend.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            // The fetch runs in its own task so a panic still settles the
            // request instead of leaving it in flight.
            let fetch = tokio::spawn(async move { backend.recommend(mood).await });
            let outcome = joined_outcome(mood, fetch.await);
            let _ = tx
                .send(AppMessage::RecommendationSettled(ticket, outcome))
                .await;
        });
    }

    // ── Message handling ──────────────────────────────────────────────────────

    /// Returns true when the screen needs a redraw.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                for action in self.handle_key(key) {
                    self.dispatch(action);
                }
                true
            }
            AppMessage::Event(Event::Mouse(mouse)) => {
                for action in self.handle_mouse(mouse) {
                    self.dispatch(action);
                }
                true
            }
            AppMessage::Event(Event::Resize(_, _)) => true,
            AppMessage::Event(_) => false,
            AppMessage::SessionChecked(ticket, check) => {
                self.state.controller.apply_session_check(ticket, check);
                true
            }
            AppMessage::RecommendationSettled(ticket, outcome) => {
                self.state.controller.settle_recommendation(ticket, outcome)
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return vec![Action::Quit],
                KeyCode::Char('r') => return vec![Action::Reload],
                _ => {}
            }
        }

        if self.help_overlay.visible {
            return self.help_overlay.handle_key(key, &self.state);
        }

        match key.code {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Char('?') => return vec![Action::ToggleHelp],
            KeyCode::F(5) => return vec![Action::Reload],
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::BackTab => return vec![Action::FocusPrev],
            _ => {}
        }

        // Mood input only exists while logged in.
        if self.state.controller.session().is_none() {
            return vec![];
        }

        if let KeyCode::Char('1'..='4') = key.code {
            return self.mood_picker.handle_key(key, &self.state);
        }

        match self.focus.current() {
            Some(ComponentId::MoodPicker) => self.mood_picker.handle_key(key, &self.state),
            Some(ComponentId::SongList) => self.song_list.handle_key(key, &self.state),
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        if self.help_overlay.visible || self.state.controller.session().is_none() {
            return vec![];
        }
        let pos = Position::new(event.column, event.row);
        let areas = self.pane_areas;
        if areas.mood_picker.contains(pos) {
            self.mood_picker
                .handle_mouse(event, areas.mood_picker, &self.state)
        } else if areas.song_list.contains(pos) {
            self.song_list.handle_mouse(event, areas.song_list, &self.state)
        } else {
            vec![]
        }
    }

    fn dispatch(&mut self, action: Action) {
        debug!("dispatch {:?}", action);
        match &action {
            Action::SelectMood(mood) => self.request_recommendation(*mood),
            Action::FocusNext => {
                self.focus.next();
            }
            Action::FocusPrev => {
                self.focus.prev();
            }
            Action::FocusPane(id) => self.focus.set(*id),
            Action::ToggleHelp => {}
            Action::Reload => {
                self.state.controller.reload();
                self.initialize();
            }
            Action::Quit => self.should_quit = true,
        }

        self.mood_picker.on_action(&action, &self.state);
        self.song_list.on_action(&action, &self.state);
        self.help_overlay.on_action(&action, &self.state);
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(Header::height(&self.state)),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.header.draw(frame, chunks[0], false, &self.state);
        draw_separator(frame, chunks[1]);

        let view = self.state.controller.view();
        let logged_in = matches!(view, View::LoggedIn(_));
        match view {
            View::LoggedOut { .. } => {
                self.pane_areas = PaneAreas::default();
                self.login_panel.draw(frame, chunks[2], false, &self.state);
            }
            View::LoggedIn(view) => {
                let error_rows = view
                    .error
                    .map_or(0, |message| wrapped_rows(message, chunks[2].width))
                    .min(MAX_ERROR_ROWS);
                let status_rows = u16::from(view.loading) + error_rows;
                let body = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3),
                        Constraint::Length(status_rows),
                        Constraint::Min(0),
                    ])
                    .split(chunks[2]);

                self.mood_picker.draw(
                    frame,
                    body[0],
                    self.focus.is_focused(ComponentId::MoodPicker),
                    &self.state,
                );

                let status = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(u16::from(view.loading)),
                        Constraint::Min(0),
                    ])
                    .split(body[1]);
                if view.loading {
                    frame.render_widget(
                        spinner_line(
                            self.state.spinner_frame,
                            LOADING_TEXT,
                            Style::default().fg(C_LOADING),
                        ),
                        status[0],
                    );
                }
                if let Some(message) = view.error {
                    frame.render_widget(
                        Paragraph::new(Span::styled(message, style_error()))
                            .alignment(Alignment::Center)
                            .wrap(Wrap { trim: true }),
                        status[1],
                    );
                }

                // Loading and results never share the screen.
                let song_area = if view.results.is_some() {
                    body[2]
                } else {
                    Rect::default()
                };
                self.pane_areas = PaneAreas {
                    mood_picker: body[0],
                    song_list: song_area,
                };
                if view.results.is_some() {
                    self.song_list.draw(
                        frame,
                        body[2],
                        self.focus.is_focused(ComponentId::SongList),
                        &self.state,
                    );
                }
            }
        }

        draw_keys_bar(frame, chunks[3], logged_in);
        self.help_overlay.draw(frame, area, true, &self.state);
    }
}

/// Outcome of a finished recommendation task. A panicked or cancelled task
/// counts as a transport failure.
fn joined_outcome(
    mood: Mood,
    joined: Result<RecommendOutcome, tokio::task::JoinError>,
) -> RecommendOutcome {
    match joined {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("recommendation task for {} ended abnormally: {}", mood, e);
            RecommendOutcome::TransportError(e.to_string())
        }
    }
}

/// Rows `text` takes when word-wrapped into `width` columns.
fn wrapped_rows(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let mut rows = 1usize;
    let mut used = 0usize;
    for word in text.split_whitespace() {
        let w = word.width();
        if used > 0 && used + 1 + w <= width {
            used += 1 + w;
            continue;
        }
        if used > 0 {
            rows += 1;
        }
        // Words wider than a row are broken across rows.
        rows += w.saturating_sub(1) / width;
        used = match w % width {
            0 if w > 0 => width,
            rest => rest,
        };
    }
    u16::try_from(rows).unwrap_or(u16::MAX)
}
