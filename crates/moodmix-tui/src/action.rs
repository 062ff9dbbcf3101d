//! Action enum — all user-initiated intents.

use moodmix_proto::Mood;

/// Panes that can hold keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    MoodPicker,
    SongList,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Recommendation ───────────────────────────────────────────────────────
    SelectMood(Mood),

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleHelp,

    // ── System ───────────────────────────────────────────────────────────────
    /// Terminal equivalent of a page reload: reset state and re-run startup.
    Reload,
    Quit,
}
