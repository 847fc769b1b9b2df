//! Application configuration loaded from environment variables.
//!
//! Required secrets (API endpoint, login code, bot token, channel) come
//! from the environment; everything else has a sensible default.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Tumar GraphQL API endpoint
    pub api_url: String,
    /// One-time login confirmation code (bootstrap fallback only)
    pub auth_code: String,
    /// Telegram bot token
    pub bot_token: String,
    /// Telegram channel to announce new programs in
    pub channel_id: String,
    /// Interval between poll cycles
    pub poll_interval: Duration,
    /// Refresh the access token when it expires within this window
    pub refresh_buffer_secs: i64,
    /// Explicit timeout applied to every outbound HTTP request
    pub request_timeout: Duration,
    /// Listing language passed to the GetPrograms query
    pub lang: String,
    /// Path of the persisted credential pair
    pub tokens_file: PathBuf,
    /// Path of the persisted known-id set
    pub known_ids_file: PathBuf,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_url: "http://localhost:4000/graphql".to_string(),
            auth_code: "test_code".to_string(),
            bot_token: "test_bot_token".to_string(),
            channel_id: "@test_channel".to_string(),
            poll_interval: Duration::from_secs(300),
            refresh_buffer_secs: 60,
            request_timeout: Duration::from_secs(30),
            lang: "EN".to_string(),
            tokens_file: PathBuf::from("tokens.json"),
            known_ids_file: PathBuf::from("known_ids.json"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            api_url: env::var("TUMAR_API_URL").map_err(|_| ConfigError::Missing("TUMAR_API_URL"))?,
            auth_code: env::var("TUMAR_AUTH_CODE")
                .map_err(|_| ConfigError::Missing("TUMAR_AUTH_CODE"))?,
            bot_token: env::var("BOT_TOKEN")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("BOT_TOKEN"))?,
            channel_id: env::var("TELEGRAM_CHANNEL_ID")
                .map_err(|_| ConfigError::Missing("TELEGRAM_CHANNEL_ID"))?,
            poll_interval: Duration::from_secs(parse_or("POLL_INTERVAL_SECS", 300)),
            refresh_buffer_secs: parse_or("TOKEN_REFRESH_BUFFER_SECS", 60),
            request_timeout: Duration::from_secs(parse_or("REQUEST_TIMEOUT_SECS", 30)),
            lang: env::var("PROGRAM_LANG").unwrap_or_else(|_| "EN".to_string()),
            tokens_file: env::var("TOKENS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("tokens.json")),
            known_ids_file: env::var("KNOWN_IDS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("known_ids.json")),
        })
    }
}

/// Read a numeric env var, falling back to `default` when unset or unparseable.
fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
