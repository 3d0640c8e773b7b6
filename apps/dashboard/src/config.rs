use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DRIVE_PAGE_SIZE: u32 = 50;

/// Dashboard configuration loaded from environment variables.
/// `BACKEND_URL` is required; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub data_dir: PathBuf,
    pub http_timeout: Duration,
    pub drive_page_size: u32,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let backend_url = require_env("BACKEND_URL")?;

        let data_dir = match std::env::var("PRORANK_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => default_data_dir()?,
        };

        let http_timeout = Duration::from_secs(
            std::env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
                .parse::<u64>()
                .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
        );

        let drive_page_size = std::env::var("DRIVE_PAGE_SIZE")
            .unwrap_or_else(|_| DEFAULT_DRIVE_PAGE_SIZE.to_string())
            .parse::<u32>()
            .context("DRIVE_PAGE_SIZE must be a positive integer")?;
        if drive_page_size == 0 {
            anyhow::bail!("DRIVE_PAGE_SIZE must be greater than zero");
        }

        Ok(Config {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            data_dir,
            http_timeout,
            drive_page_size,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Platform data directory, e.g. `~/.local/share/prorank` on Linux.
fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "ProRank", "prorank")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .context("Unable to determine a data directory; set PRORANK_DATA_DIR")
}
