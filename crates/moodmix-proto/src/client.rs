//! HTTP client for the recommendation backend.
//!
//! Every request carries the backend session cookie. The public calls never
//! fail with `Err`: each returns a tagged outcome so the caller can tell
//! "not logged in" apart from "backend unreachable" without inspecting
//! error strings.

use std::sync::Arc;

use reqwest::{cookie::Jar, header::ACCEPT, Client, Url};
use tracing::{debug, warn};

use crate::config::BackendConfig;
use crate::mood::Mood;
use crate::protocol::{ErrorBody, Identity, Song, LOGIN_PATH, ME_PATH, RECOMMEND_PATH};

/// Message used when a rejected recommendation carries no usable `error`.
pub const GENERIC_FAILURE: &str = "Something went wrong";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid backend url {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result of `GET /api/me`.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCheck {
    /// 2xx with a readable identity.
    Authenticated(Identity),
    /// The backend answered but rejected the session (e.g. 401).
    NotLoggedIn { status: u16 },
    /// The request never produced a usable answer.
    TransportError(String),
}

/// Result of `GET /api/recommend`.
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendOutcome {
    Songs(Vec<Song>),
    /// Non-2xx answer. `message` is the server's `error` field, or
    /// [`GENERIC_FAILURE`] when the body had none.
    Rejected { status: u16, message: String },
    TransportError(String),
}

#[derive(Debug, Clone)]
pub struct Backend {
    client: Client,
    base_url: Url,
}

impl Backend {
    pub fn new(config: &BackendConfig) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(config.base_url.trim()).map_err(|e| ClientError::InvalidBaseUrl {
                url: config.base_url.clone(),
                message: e.to_string(),
            })?;

        let jar = Arc::new(Jar::default());
        if let Some(cookie) = config.session_cookie.as_deref().filter(|c| !c.trim().is_empty()) {
            jar.add_cookie_str(cookie.trim(), &base_url);
        }

        let mut builder = Client::builder().cookie_provider(jar);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// Where the user goes to start the backend's login redirect flow.
    pub fn login_url(&self) -> String {
        self.endpoint(LOGIN_PATH)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    pub async fn check_session(&self) -> SessionCheck {
        match self.fetch_identity().await {
            Ok(check) => check,
            Err(e) => {
                warn!("session check failed: {}", e);
                SessionCheck::TransportError(e.to_string())
            }
        }
    }

    async fn fetch_identity(&self) -> Result<SessionCheck, ClientError> {
        let url = self.endpoint(ME_PATH);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!("session check: {} -> not logged in", status);
            return Ok(SessionCheck::NotLoggedIn {
                status: status.as_u16(),
            });
        }

        // A 2xx that is not an identity gets no session, same as an
        // unreachable backend, but is logged on its own.
        let body = response.bytes().await?;
        match serde_json::from_slice::<Identity>(&body) {
            Ok(identity) => Ok(SessionCheck::Authenticated(identity)),
            Err(e) => {
                warn!("malformed identity from {}: {}", ME_PATH, e);
                Ok(SessionCheck::TransportError(format!(
                    "malformed identity: {}",
                    e
                )))
            }
        }
    }

    pub async fn recommend(&self, mood: Mood) -> RecommendOutcome {
        match self.fetch_recommendations(mood).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("recommendation request for {} failed: {}", mood, e);
                RecommendOutcome::TransportError(e.to_string())
            }
        }
    }

    async fn fetch_recommendations(&self, mood: Mood) -> Result<RecommendOutcome, ClientError> {
        let url = self.endpoint(RECOMMEND_PATH);
        debug!("GET {}?mood={}", url, mood);
        let response = self
            .client
            .get(&url)
            .query(&[("mood", mood.token())])
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable body on a rejection still counts as a rejection.
            let body = response.bytes().await.unwrap_or_default();
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message().map(str::to_string))
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            debug!("recommend: {} -> {:?}", status, message);
            return Ok(RecommendOutcome::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        let songs: Vec<Song> = serde_json::from_slice(&body)?;
        debug!("recommend: {} songs for {}", songs.len(), mood);
        Ok(RecommendOutcome::Songs(songs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> Backend {
        Backend::new(&BackendConfig {
            base_url: base.to_string(),
            ..BackendConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_login_url() {
        assert_eq!(backend("http://localhost:8000").login_url(), "http://localhost:8000/login");
        assert_eq!(backend("http://localhost:8000/").login_url(), "http://localhost:8000/login");
        assert_eq!(backend("https://mix.example/app/").login_url(), "https://mix.example/app/login");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = Backend::new(&BackendConfig {
            base_url: "not a url".to_string(),
            ..BackendConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
    }
}
