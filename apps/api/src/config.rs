use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub portfolio_data_path: PathBuf,
    /// Built frontend served as the router fallback, if any.
    pub static_dir: Option<PathBuf>,
    pub agent_max_steps: usize,
    pub chat_history_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            portfolio_data_path: std::env::var("PORTFOLIO_DATA_PATH")
                .unwrap_or_else(|_| "content/portfolio.yaml".to_string())
                .into(),
            static_dir: std::env::var("STATIC_DIR")
                .ok()
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from),
            agent_max_steps: parse_env("AGENT_MAX_STEPS", 6)
                .context("AGENT_MAX_STEPS must be a non-negative integer")?,
            chat_history_limit: parse_env("CHAT_HISTORY_LIMIT", 20)
                .context("CHAT_HISTORY_LIMIT must be a non-negative integer")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => Ok(raw.trim().parse::<T>()?),
        Err(_) => Ok(default),
    }
}
