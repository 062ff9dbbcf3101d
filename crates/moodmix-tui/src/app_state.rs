//! AppState — shared read-only data passed to all components during render/event.
//!
//! Components read this but never mutate it. The App event-loop is the only
//! thing that writes to it, and it does so through the Controller.

use crate::controller::Controller;

pub struct AppState {
    pub controller: Controller,
    /// Backend login hand-off, shown as the login affordance.
    pub login_url: String,
    /// Image reference for songs without album artwork.
    pub placeholder_image: String,
    /// Advances on every tick while a request is in flight.
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new(login_url: String, placeholder_image: String) -> Self {
        Self {
            controller: Controller::new(),
            login_url,
            placeholder_image,
            spinner_frame: 0,
        }
    }
}
