//! SongList component — renders a recommendation result.
//!
//! It never decides on its own whether a competing status is showing: the
//! Controller's `ResultsView` says whether the empty-state placeholder is
//! allowed. While a request is in flight the parent does not draw it at all.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use moodmix_proto::Song;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    controller::{RequestStatus, ResultsView, View},
    theme::{style_default, style_link, style_muted, style_secondary, style_selected_focused},
    widgets::pane_chrome::pane_chrome,
};

pub const EMPTY_PROMPT: &str = "Pick a mood to see songs!";

/// Rows per song: title, artists, link, image, gap.
const ENTRY_HEIGHT: u16 = 5;

/// Everything shown for one song.
#[derive(Debug, Clone, PartialEq)]
pub struct SongEntry<'a> {
    pub title: &'a str,
    /// Artist names comma-joined in their given order.
    pub artists: String,
    pub link: &'a str,
    /// Album artwork, or the placeholder when the album has none.
    pub image: &'a str,
    pub image_alt: &'a str,
}

pub fn song_entries<'a>(songs: &'a [Song], placeholder: &'a str) -> Vec<SongEntry<'a>> {
    songs
        .iter()
        .map(|song| SongEntry {
            title: &song.name,
            artists: song.artist_line(),
            link: song.link(),
            image: song.primary_image().unwrap_or(placeholder),
            image_alt: song.album.name.as_deref().unwrap_or(""),
        })
        .collect()
}

/// Cut `text` to at most `width` columns, marking the cut with `…`.
fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

pub struct SongList {
    selected: usize,
    offset: usize,
    len: usize,
}

impl SongList {
    pub fn new() -> Self {
        Self {
            selected: 0,
            offset: 0,
            len: 0,
        }
    }

    fn select_down(&mut self, n: usize) {
        self.selected = (self.selected + n).min(self.len.saturating_sub(1));
    }

    fn select_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    fn ensure_visible(&mut self, rows: usize) {
        let rows = rows.max(1);
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + rows {
            self.offset = self.selected + 1 - rows;
        }
    }

    fn draw_results(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        focused: bool,
        results: &ResultsView<'_>,
        state: &AppState,
    ) {
        self.len = results.songs.len();
        if self.selected >= self.len {
            self.selected = self.len.saturating_sub(1);
        }

        if results.songs.is_empty() {
            if results.show_placeholder {
                frame.render_widget(
                    Paragraph::new(Span::styled(EMPTY_PROMPT, style_secondary()))
                        .alignment(Alignment::Center),
                    area,
                );
            }
            return;
        }

        let title = match state.controller.request() {
            RequestStatus::Succeeded { mood, .. } => {
                format!("{} · songs ({})", mood, results.songs.len())
            }
            _ => format!("songs ({})", results.songs.len()),
        };
        let block = pane_chrome(&title, Some("tab"), focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let visible = (inner.height / ENTRY_HEIGHT) as usize;
        self.ensure_visible(visible);
        let width = inner.width.saturating_sub(4) as usize;

        let entries = song_entries(results.songs, &state.placeholder_image);
        let mut lines: Vec<Line> = Vec::new();
        for (i, entry) in entries
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(visible.max(1))
        {
            let is_selected = i == self.selected;
            let marker = if is_selected { "▶ " } else { "  " };
            let title_style = if is_selected && focused {
                style_selected_focused()
            } else {
                style_default().add_modifier(Modifier::BOLD)
            };

            lines.push(Line::from(vec![
                Span::styled(marker, style_secondary()),
                Span::styled(truncate(entry.title, width), title_style),
            ]));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(truncate(&entry.artists, width), style_secondary()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  ↗ ", style_muted()),
                Span::styled(truncate(entry.link, width), style_link()),
            ]));
            let image = if entry.image_alt.is_empty() {
                entry.image.to_string()
            } else {
                format!("{} ({})", entry.image, entry.image_alt)
            };
            lines.push(Line::from(vec![
                Span::styled("  ▣ ", style_muted()),
                Span::styled(truncate(&image, width), style_muted()),
            ]));
            lines.push(Line::from(""));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for SongList {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.select_down(1),
            KeyCode::Up | KeyCode::Char('k') => self.select_up(1),
            KeyCode::PageDown => self.select_down(5),
            KeyCode::PageUp => self.select_up(5),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => self.selected = self.len.saturating_sub(1),
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollDown => {
                self.select_down(1);
                vec![]
            }
            MouseEventKind::ScrollUp => {
                self.select_up(1);
                vec![]
            }
            MouseEventKind::Down(_) => vec![Action::FocusPane(ComponentId::SongList)],
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) {
        if let Action::SelectMood(_) = action {
            self.selected = 0;
            self.offset = 0;
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        if let View::LoggedIn(view) = state.controller.view() {
            if let Some(results) = view.results {
                self.draw_results(frame, area, focused, &results, state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodmix_proto::protocol::{Album, Artist, ExternalUrls, Image};

    fn song(name: &str, images: &[&str], artists: &[&str]) -> Song {
        Song {
            id: name.to_lowercase(),
            name: name.to_string(),
            album: Album {
                name: Some("Album".to_string()),
                images: images
                    .iter()
                    .map(|u| Image { url: u.to_string() })
                    .collect(),
            },
            external_urls: ExternalUrls {
                spotify: format!("https://open.spotify.com/track/{}", name),
            },
            artists: artists
                .iter()
                .map(|a| Artist {
                    name: a.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_entries_follow_song_order() {
        let songs = vec![
            song("One", &["one.jpg"], &["A", "B"]),
            song("Two", &[], &["C"]),
        ];
        let entries = song_entries(&songs, "ph.png");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "One");
        assert_eq!(entries[0].artists, "A, B");
        assert_eq!(entries[0].image, "one.jpg");
        assert_eq!(entries[1].image, "ph.png");
        assert_eq!(entries[1].link, "https://open.spotify.com/track/Two");
        assert_eq!(entries[1].image_alt, "Album");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("abcde", 5), "abcde");
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut list = SongList::new();
        list.len = 3;
        list.select_down(10);
        assert_eq!(list.selected, 2);
        list.select_up(1);
        assert_eq!(list.selected, 1);
        list.ensure_visible(1);
        assert_eq!(list.offset, 1);
    }
}
