mod action;
mod app;
mod app_state;
mod component;
mod components;
mod controller;
mod focus;
mod theme;
mod widgets;

use clap::Parser;

use moodmix_proto::{config::Config, platform, Backend};

#[derive(Debug, Parser)]
#[command(name = "moodmix", version, about = "Mood-based song recommendations in the terminal")]
struct Cli {
    /// URL the login flow redirected back to. An `#error=...` fragment is
    /// reported as a failed login.
    launch_url: Option<String>,

    /// Backend origin (overrides `backend.base_url` in config.toml)
    #[arg(long)]
    base_url: Option<String>,

    /// Session cookie issued after login, e.g. `session=abc123`
    #[arg(long)]
    cookie: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = platform::log_path();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // RUST_LOG overrides; HTTP client internals are noisy at debug.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    eprintln!("moodmix log: {}", log_path.display());

    tracing::info!("moodmix starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("config unreadable, using defaults: {}", e);
        Config::default()
    });
    if let Some(base_url) = cli.base_url {
        config.backend.base_url = base_url;
    }
    if let Some(cookie) = cli.cookie {
        config.backend.session_cookie = Some(cookie);
    }
    tracing::info!("backend: {}", config.backend.base_url);

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let backend = Backend::new(&config.backend)?;
    let app = app::App::new(backend, cli.launch_url, config.ui.placeholder_image);
    app.run().await?;

    Ok(())
}
