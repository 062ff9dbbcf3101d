//! MoodPicker component — a row of mood buttons.
//!
//! Holds only the cursor; picking a mood just emits `Action::SelectMood`.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use moodmix_proto::Mood;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{style_accent, style_secondary, style_selected_focused},
    widgets::pane_chrome::pane_chrome,
};

const BUTTON_PADDING: u16 = 4;

pub struct MoodPicker {
    cursor: usize,
    /// Button rects from the last draw, for mouse hit-testing.
    buttons: Vec<Rect>,
}

impl MoodPicker {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            buttons: Vec::new(),
        }
    }

    fn pick(&mut self, index: usize) -> Vec<Action> {
        match Mood::ALL.get(index) {
            Some(&mood) => {
                self.cursor = index;
                vec![Action::SelectMood(mood)]
            }
            None => vec![],
        }
    }
}

impl Component for MoodPicker {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![]
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor = (self.cursor + 1).min(Mood::ALL.len() - 1);
                vec![]
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.pick(self.cursor),
            KeyCode::Char(c @ '1'..='9') => self.pick(c as usize - '1' as usize),
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        let clicked = self
            .buttons
            .iter()
            .position(|r| r.contains(Position::new(event.column, event.row)));
        match clicked {
            Some(index) => {
                let mut actions = vec![Action::FocusPane(ComponentId::MoodPicker)];
                actions.extend(self.pick(index));
                actions
            }
            None => vec![Action::FocusPane(ComponentId::MoodPicker)],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) {
        if let Action::SelectMood(mood) = action {
            self.cursor = mood.index();
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, _state: &AppState) {
        let block = pane_chrome("mood", Some("1-4"), focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints: Vec<Constraint> = Mood::ALL
            .iter()
            .map(|m| Constraint::Length(m.label().width() as u16 + BUTTON_PADDING))
            .collect();
        constraints.push(Constraint::Min(0));

        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(inner);

        self.buttons = cells.iter().take(Mood::ALL.len()).copied().collect();

        for (i, (mood, cell)) in Mood::ALL.iter().zip(cells.iter()).enumerate() {
            let style = if i == self.cursor && focused {
                style_selected_focused()
            } else if i == self.cursor {
                style_accent()
            } else {
                style_secondary()
            };
            let line = Line::from(vec![
                Span::styled(format!(" {} ", i + 1), style_secondary()),
                Span::styled(mood.label(), style),
            ]);
            frame.render_widget(Paragraph::new(line), *cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> AppState {
        AppState::new("http://localhost:8000/login".into(), "placeholder".into())
    }

    #[test]
    fn test_enter_dispatches_lowercase_mood() {
        let st = state();
        let mut picker = MoodPicker::new();
        picker.handle_key(key(KeyCode::Right), &st);
        picker.handle_key(key(KeyCode::Right), &st);
        assert_eq!(
            picker.handle_key(key(KeyCode::Enter), &st),
            vec![Action::SelectMood(Mood::Energetic)]
        );
        assert_eq!(Mood::ALL[picker.cursor].token(), "energetic");
    }

    #[test]
    fn test_number_keys_pick_directly() {
        let st = state();
        let mut picker = MoodPicker::new();
        assert_eq!(
            picker.handle_key(key(KeyCode::Char('4')), &st),
            vec![Action::SelectMood(Mood::Chill)]
        );
        assert!(picker.handle_key(key(KeyCode::Char('9')), &st).is_empty());
        assert_eq!(Mood::ALL[picker.cursor], Mood::Chill);
    }

    #[test]
    fn test_click_on_third_button_selects_energetic() {
        use ratatui::{backend::TestBackend, Terminal};

        let st = state();
        let mut picker = MoodPicker::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 3)).unwrap();
        let area = Rect::new(0, 0, 80, 3);
        terminal
            .draw(|f| picker.draw(f, area, true, &st))
            .unwrap();

        let button = picker.buttons[2];
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: button.x + 1,
            row: button.y,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            picker.handle_mouse(click, area, &st),
            vec![
                Action::FocusPane(ComponentId::MoodPicker),
                Action::SelectMood(Mood::Energetic),
            ]
        );
        assert_eq!(Mood::ALL[picker.cursor], Mood::Energetic);

        // Clicking the pane border focuses without picking.
        let border = MouseEvent { column: 0, row: 0, ..click };
        assert_eq!(
            picker.handle_mouse(border, area, &st),
            vec![Action::FocusPane(ComponentId::MoodPicker)]
        );
    }

    #[test]
    fn test_cursor_is_clamped() {
        let st = state();
        let mut picker = MoodPicker::new();
        picker.handle_key(key(KeyCode::Left), &st);
        assert_eq!(Mood::ALL[picker.cursor], Mood::Happy);
        for _ in 0..10 {
            picker.handle_key(key(KeyCode::Char('l')), &st);
        }
        assert_eq!(Mood::ALL[picker.cursor], Mood::Chill);
    }
}
