pub mod pane_chrome;
pub mod spinner;
pub mod status_bar;
