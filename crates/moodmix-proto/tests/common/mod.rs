//! In-process stand-in for the recommendation backend.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;

pub const COOKIE: &str = "session=test-session";

/// What `/api/recommend` answers with for an authenticated caller.
#[derive(Clone)]
pub enum RecommendReply {
    Json(StatusCode, serde_json::Value),
    Raw(StatusCode, &'static str),
}

struct MockState {
    display_name: String,
    /// Overrides the `/api/me` body for an authenticated caller.
    me_body: Option<serde_json::Value>,
    reply: RecommendReply,
    me_hits: AtomicUsize,
    recommend_hits: AtomicUsize,
    moods: Mutex<Vec<String>>,
}

pub struct MockBackend {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockBackend {
    pub fn me_hits(&self) -> usize {
        self.state.me_hits.load(Ordering::SeqCst)
    }

    pub fn recommend_hits(&self) -> usize {
        self.state.recommend_hits.load(Ordering::SeqCst)
    }

    pub fn moods(&self) -> Vec<String> {
        self.state.moods.lock().unwrap().clone()
    }
}

#[derive(Deserialize)]
struct RecommendQuery {
    mood: String,
}

fn has_session(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.split(';').any(|c| c.trim() == COOKIE))
}

async fn me(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.me_hits.fetch_add(1, Ordering::SeqCst);
    if !has_session(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "not logged in" })),
        )
            .into_response();
    }
    if let Some(body) = &state.me_body {
        return Json(body.clone()).into_response();
    }
    Json(serde_json::json!({
        "display_name": state.display_name,
        "id": "user-1",
    }))
    .into_response()
}

async fn recommend(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(query): Query<RecommendQuery>,
) -> Response {
    state.recommend_hits.fetch_add(1, Ordering::SeqCst);
    state.moods.lock().unwrap().push(query.mood);
    if !has_session(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "Not authenticated" })),
        )
            .into_response();
    }
    match state.reply.clone() {
        RecommendReply::Json(status, body) => (status, Json(body)).into_response(),
        RecommendReply::Raw(status, body) => (status, body).into_response(),
    }
}

pub async fn spawn(reply: RecommendReply) -> MockBackend {
    spawn_with_me(reply, None).await
}

/// Like `spawn`, but `/api/me` answers an authenticated caller with `me_body`.
pub async fn spawn_with_me(reply: RecommendReply, me_body: Option<serde_json::Value>) -> MockBackend {
    let state = Arc::new(MockState {
        display_name: "Ada".to_string(),
        me_body,
        reply,
        me_hits: AtomicUsize::new(0),
        recommend_hits: AtomicUsize::new(0),
        moods: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/api/me", get(me))
        .route("/api/recommend", get(recommend))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend {
        base_url: format!("http://{}", addr),
        state,
    }
}

/// A base URL nothing is listening on.
pub async fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn one_song() -> serde_json::Value {
    serde_json::json!([{
        "id": "1",
        "name": "Song A",
        "album": { "images": [] },
        "external_urls": { "spotify": "https://open.spotify.com/track/1" },
        "artists": [{ "name": "X" }]
    }])
}
