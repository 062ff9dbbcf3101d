//! Header component — title strip plus the welcome banner once logged in.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    app_state::AppState,
    component::Component,
    controller::View,
    theme::{style_accent, style_default, C_SECONDARY},
};

pub const TITLE: &str = "Mood Mixer ♫";

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    /// Rows needed: title only, or title plus banner.
    pub fn height(state: &AppState) -> u16 {
        match state.controller.view() {
            View::LoggedIn(_) => 2,
            View::LoggedOut { .. } => 1,
        }
    }
}

impl Component for Header {
    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                TITLE,
                style_accent().add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center),
            rows[0],
        );

        if let View::LoggedIn(view) = state.controller.view() {
            let banner = Line::from(vec![
                Span::styled("Welcome, ", Style::default().fg(C_SECONDARY)),
                Span::styled(view.display_name, style_default().add_modifier(Modifier::BOLD)),
                Span::styled("!", Style::default().fg(C_SECONDARY)),
            ]);
            frame.render_widget(Paragraph::new(banner).alignment(Alignment::Center), rows[1]);
        }
    }
}
