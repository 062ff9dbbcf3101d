//! LoginPanel component — the whole body while there is no session.

use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::{
    app_state::AppState,
    component::Component,
    controller::View,
    theme::{style_default, style_error, style_link, style_secondary},
};

pub const LOGIN_PROMPT: &str = "Please log in to get personalized recommendations.";
pub const LOGIN_LABEL: &str = "Login with Spotify";

pub struct LoginPanel;

impl LoginPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Component for LoginPanel {
    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let View::LoggedOut { error } = state.controller.view() else {
            return;
        };

        let status = match error {
            Some(message) => Line::from(Span::styled(message, style_error())),
            None => Line::from(Span::styled(LOGIN_PROMPT, style_secondary())),
        };

        let lines = vec![
            Line::from(""),
            status,
            Line::from(""),
            Line::from(Span::styled(
                LOGIN_LABEL,
                style_default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(state.login_url.as_str(), style_link())),
        ];

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
    }
}
