use std::path::PathBuf;

use anyhow::Result;

/// Console configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub api_url: String,
    /// Read content from disk instead of fetching it from the API.
    pub portfolio_data_path: Option<PathBuf>,
    pub rust_log: String,
    /// Log destination while the terminal UI owns the screen; stderr when unset.
    pub log_file: Option<PathBuf>,
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(ConsoleConfig {
            api_url: std::env::var("PORTFOLIO_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            portfolio_data_path: std::env::var("PORTFOLIO_DATA_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
            log_file: std::env::var("CONSOLE_LOG_FILE")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}
