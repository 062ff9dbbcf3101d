//! Status bar — bottom line with session state and keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_ACCENT, C_MUTED, C_SECONDARY, C_SEPARATOR};

/// Draw a horizontal separator line.
pub fn draw_separator(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(C_SEPARATOR),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, logged_in: bool) {
    let (label, label_color) = if logged_in {
        ("ONLINE", C_ACCENT)
    } else {
        ("LOGGED OUT", C_SECONDARY)
    };

    let keys = if logged_in {
        " ←→/hl mood  Enter pick  1-4 quick pick  ↑↓/jk scroll  Tab pane  ^R reload  ? help  q quit"
    } else {
        " log in with the link above, then ^R reload  ? help  q quit"
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", label),
            Style::default().fg(label_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys, Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
