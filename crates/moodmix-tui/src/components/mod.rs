pub mod header;
pub mod help_overlay;
pub mod login_panel;
pub mod mood_picker;
pub mod song_list;
