use serde::{Deserialize, Serialize};

/// Path of the backend's browser login hand-off.
pub const LOGIN_PATH: &str = "/login";
/// Path of the "who am I" session check.
pub const ME_PATH: &str = "/api/me";
/// Path of the mood recommendation endpoint.
pub const RECOMMEND_PATH: &str = "/api/recommend";

/// Identity payload returned by `GET /api/me`.
///
/// Only `display_name` is guaranteed; everything else the backend sends is
/// kept in `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub display_name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One entry of a `GET /api/recommend` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub album: Album,
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
}

/// Body of a non-2xx recommendation response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl Song {
    /// First album image, if the backend sent any.
    pub fn primary_image(&self) -> Option<&str> {
        self.album
            .images
            .first()
            .map(|i| i.url.as_str())
            .filter(|u| !u.is_empty())
    }

    /// Artist names joined with ", " in the order given.
    pub fn artist_line(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn link(&self) -> &str {
        &self.external_urls.spotify
    }
}

impl ErrorBody {
    /// Server-provided message, ignoring blank strings.
    pub fn message(&self) -> Option<&str> {
        self.error.as_deref().map(str::trim).filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_deserialize_minimal() {
        let json = r#"[{"id":"1","name":"Song A","album":{"images":[]},
            "external_urls":{"spotify":"https://open.spotify.com/track/1"},
            "artists":[{"name":"X"}]}]"#;
        let songs: Vec<Song> = serde_json::from_str(json).unwrap();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].name, "Song A");
        assert_eq!(songs[0].primary_image(), None);
        assert_eq!(songs[0].artist_line(), "X");
        assert_eq!(songs[0].link(), "https://open.spotify.com/track/1");
    }

    #[test]
    fn test_artist_line_keeps_order() {
        let json = r#"{"id":"2","name":"Duet","album":{"name":"LP","images":[{"url":"a.jpg"},{"url":"b.jpg"}]},
            "external_urls":{"spotify":"u"},
            "artists":[{"name":"Zed"},{"name":"Amy"},{"name":"Mo"}]}"#;
        let song: Song = serde_json::from_str(json).unwrap();
        assert_eq!(song.artist_line(), "Zed, Amy, Mo");
        assert_eq!(song.primary_image(), Some("a.jpg"));
        assert_eq!(song.album.name.as_deref(), Some("LP"));
    }

    #[test]
    fn test_identity_keeps_extra_fields() {
        let id: Identity =
            serde_json::from_str(r#"{"display_name":"Ada","id":"u1","country":"GB"}"#).unwrap();
        assert_eq!(id.display_name, "Ada");
        assert_eq!(id.id.as_deref(), Some("u1"));
        assert_eq!(id.extra.get("country").and_then(|v| v.as_str()), Some("GB"));
    }

    #[test]
    fn test_error_body_message() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"rate limited"}"#).unwrap();
        assert_eq!(body.message(), Some("rate limited"));
        let blank: ErrorBody = serde_json::from_str(r#"{"error":"  "}"#).unwrap();
        assert_eq!(blank.message(), None);
        let none: ErrorBody = serde_json::from_str(r#"{"detail":"x"}"#).unwrap();
        assert_eq!(none.message(), None);
    }
}
