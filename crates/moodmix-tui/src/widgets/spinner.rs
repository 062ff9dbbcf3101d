//! One-line animated spinner used for the in-flight indicator.

use ratatui::{
    layout::Alignment,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

const SPINNER_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub fn spinner_symbol(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

/// Centered `<symbol> <label>` line.
pub fn spinner_line<'a>(frame: usize, label: &'a str, style: Style) -> Paragraph<'a> {
    Paragraph::new(Line::from(vec![
        Span::styled(spinner_symbol(frame), style),
        Span::raw(" "),
        Span::styled(label, style),
    ]))
    .alignment(Alignment::Center)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_wrap() {
        assert_eq!(spinner_symbol(0), spinner_symbol(SPINNER_FRAMES.len()));
        assert_ne!(spinner_symbol(0), spinner_symbol(1));
    }
}
