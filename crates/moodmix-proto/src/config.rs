use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Origin serving `/login`, `/api/me` and `/api/recommend`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Cookie issued by the backend after login, e.g. `session=abc123`.
    /// Seeded into the client's cookie store for the backend origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,
    /// Per-request timeout in seconds. 0 disables the timeout.
    #[serde(default)]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Image reference shown for songs whose album has no artwork.
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_cookie: None,
            request_timeout_secs: 0,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            placeholder_image: default_placeholder_image(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_placeholder_image() -> String {
    "https://placehold.co/64x64/282828/b3b3b3?text=N/A".to_string()
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`, writing the defaults there first if it does not exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert!(config.backend.session_cookie.is_none());
        assert_eq!(config.backend.request_timeout(), None);
        assert!(config.ui.placeholder_image.starts_with("https://"));
        assert!(Config::config_path().ends_with("moodmix/config.toml"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [backend]
            session_cookie = "session=abc"
            request_timeout_secs = 15
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.backend.session_cookie.as_deref(), Some("session=abc"));
        assert_eq!(config.backend.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.ui.placeholder_image, default_placeholder_image());
    }

    #[test]
    fn test_load_creates_file() {
        let dir = std::env::temp_dir().join(format!("moodmix-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = std::fs::remove_dir_all(&dir);

        let created = Config::load_from(&path).unwrap();
        assert!(path.exists());
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(created.backend.base_url, reloaded.backend.base_url);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
