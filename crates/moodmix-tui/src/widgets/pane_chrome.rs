//! PaneChrome — standardized bordered pane with focus styling.

use crate::theme::{style_focused_border, style_unfocused_border, C_MUTED, C_NUMBER_HINT, C_PRIMARY};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

/// Renders a bordered pane with consistent focus styling.
///
/// `key_hint` is shown before the title, e.g. `[tab]`.
pub fn pane_chrome<'a>(title: &'a str, key_hint: Option<&'a str>, focused: bool) -> Block<'a> {
    let border_style = if focused {
        style_focused_border()
    } else {
        style_unfocused_border()
    };

    let title_style = if focused {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_MUTED)
    };

    let mut title_spans = Vec::new();
    if let Some(hint) = key_hint {
        title_spans.push(Span::styled(
            format!("[{}] ", hint),
            Style::default().fg(C_NUMBER_HINT),
        ));
    }
    title_spans.push(Span::styled(title, title_style));

    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(title_spans))
}
