/// Controller — sole owner of session and recommendation state.
///
/// The Controller never performs I/O itself. The App event loop asks it to
/// start an operation, runs the network call on a background task, and hands
/// the tagged outcome back through `apply_session_check` /
/// `settle_recommendation`. Every transition runs to completion inside one
/// event-loop turn, so no two transitions ever interleave.
///
/// Overlapping recommendation requests are resolved by generation: each
/// `begin_recommendation` bumps the counter and only the settlement carrying
/// the current generation is applied.
use moodmix_proto::protocol::{Identity, Song};
use moodmix_proto::{redirect, Mood, RecommendOutcome, SessionCheck};
use tracing::{debug, error, info, warn};

pub const LOGIN_FAILED: &str = "Failed to log in. Please try again.";
pub const LOG_IN_FIRST: &str = "Please log in first.";
pub const BACKEND_UNREACHABLE: &str = "Failed to get songs. Is the backend server running?";

// ── Request lifecycle ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    InFlight { mood: Mood },
    Succeeded { mood: Mood, songs: Vec<Song> },
    Failed { mood: Mood },
}

/// Handed out by `begin_recommendation`; identifies one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub generation: u64,
    pub mood: Mood,
}

/// Identifies one session check. Checks started before a reload are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTicket {
    epoch: u64,
}

/// What the result area should show. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus {
    Loading,
    Error,
    Empty,
    HasResults,
}

// ── Render decision ───────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
pub enum View<'a> {
    LoggedOut { error: Option<&'a str> },
    LoggedIn(LoggedInView<'a>),
}

#[derive(Debug, PartialEq)]
pub struct LoggedInView<'a> {
    pub display_name: &'a str,
    pub loading: bool,
    pub error: Option<&'a str>,
    /// `None` while a request is in flight.
    pub results: Option<ResultsView<'a>>,
}

#[derive(Debug, PartialEq)]
pub struct ResultsView<'a> {
    pub songs: &'a [Song],
    pub show_placeholder: bool,
}

// ── Controller ────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Controller {
    session: Option<Identity>,
    request: RequestStatus,
    error: Option<String>,
    generation: u64,
    epoch: u64,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&Identity> {
        self.session.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn request(&self) -> &RequestStatus {
        &self.request
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.request, RequestStatus::InFlight { .. })
    }

    /// Songs of the most recent request, empty unless it succeeded.
    pub fn songs(&self) -> &[Song] {
        match &self.request {
            RequestStatus::Succeeded { songs, .. } => songs,
            _ => &[],
        }
    }

    // ── initialize ───────────────────────────────────────────────────────────

    /// Inspect the URL the login flow redirected back to. Returns true if it
    /// reported a login failure.
    pub fn apply_redirect(&mut self, launch_url: &str) -> bool {
        match redirect::redirect_error(launch_url) {
            Some(token) => {
                warn!("login redirect reported error: {}", token);
                self.error = Some(LOGIN_FAILED.to_string());
                true
            }
            None => false,
        }
    }

    pub fn begin_session_check(&self) -> SessionTicket {
        SessionTicket { epoch: self.epoch }
    }

    /// Fold a finished `/api/me` call into the state. Only an authenticated
    /// answer changes anything; a rejection is the ordinary logged-out state
    /// and a transport failure degrades to it silently.
    pub fn apply_session_check(&mut self, ticket: SessionTicket, check: SessionCheck) -> bool {
        if ticket.epoch != self.epoch {
            debug!("discarding session check from before reload");
            return false;
        }
        match check {
            SessionCheck::Authenticated(identity) => {
                info!("logged in as {}", identity.display_name);
                self.session = Some(identity);
                true
            }
            SessionCheck::NotLoggedIn { status } => {
                info!("no active session ({})", status);
                false
            }
            SessionCheck::TransportError(detail) => {
                warn!("could not reach /api/me, showing logged-out view: {}", detail);
                false
            }
        }
    }

    // ── requestRecommendation ────────────────────────────────────────────────

    /// Start a recommendation request. Returns `None` (and sets the
    /// "log in first" error) when there is no session; the caller must not
    /// issue a network call in that case.
    pub fn begin_recommendation(&mut self, mood: Mood) -> Option<RequestTicket> {
        if self.session.is_none() {
            self.error = Some(LOG_IN_FIRST.to_string());
            return None;
        }

        self.error = None;
        self.generation += 1;
        self.request = RequestStatus::InFlight { mood };
        debug!("recommendation #{} for {}", self.generation, mood);
        Some(RequestTicket {
            generation: self.generation,
            mood,
        })
    }

    /// Apply the outcome of a request. Superseded requests are ignored and
    /// return false. Every applied outcome leaves the in-flight state.
    pub fn settle_recommendation(&mut self, ticket: RequestTicket, outcome: RecommendOutcome) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "discarding recommendation #{} ({}), current is #{}",
                ticket.generation, ticket.mood, self.generation
            );
            return false;
        }

        let mood = ticket.mood;
        self.request = match outcome {
            RecommendOutcome::Songs(songs) => {
                info!("{} songs for {}", songs.len(), mood);
                RequestStatus::Succeeded { mood, songs }
            }
            RecommendOutcome::Rejected { status, message } => {
                warn!("recommendation for {} rejected ({}): {}", mood, status, message);
                self.error = Some(message);
                RequestStatus::Failed { mood }
            }
            RecommendOutcome::TransportError(detail) => {
                error!("recommendation for {} failed: {}", mood, detail);
                self.error = Some(BACKEND_UNREACHABLE.to_string());
                RequestStatus::Failed { mood }
            }
        };
        true
    }

    /// Back to the freshly started state. Outstanding requests and session
    /// checks become stale.
    pub fn reload(&mut self) {
        info!("reloading session state");
        self.session = None;
        self.request = RequestStatus::Idle;
        self.error = None;
        self.generation += 1;
        self.epoch += 1;
    }

    // ── Render decision ──────────────────────────────────────────────────────

    pub fn display_status(&self) -> DisplayStatus {
        if self.is_in_flight() {
            DisplayStatus::Loading
        } else if self.error.is_some() {
            DisplayStatus::Error
        } else if self.songs().is_empty() {
            DisplayStatus::Empty
        } else {
            DisplayStatus::HasResults
        }
    }

    pub fn view(&self) -> View<'_> {
        let Some(identity) = &self.session else {
            return View::LoggedOut {
                error: self.error(),
            };
        };

        let status = self.display_status();
        let results = (status != DisplayStatus::Loading).then(|| ResultsView {
            songs: self.songs(),
            show_placeholder: status == DisplayStatus::Empty,
        });

        View::LoggedIn(LoggedInView {
            display_name: &identity.display_name,
            loading: status == DisplayStatus::Loading,
            error: self.error(),
            results,
        })
    }
}
