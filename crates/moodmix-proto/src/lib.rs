pub mod client;
pub mod config;
pub mod mood;
pub mod platform;
pub mod protocol;
pub mod redirect;

pub use client::{Backend, ClientError, RecommendOutcome, SessionCheck};
pub use mood::Mood;
pub use protocol::{Identity, Song};
