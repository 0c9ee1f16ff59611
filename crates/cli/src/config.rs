//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `QUOTEDESK_DATA_DIR` - Directory holding the quote snapshot and
//!   preferences (default: `.quotedesk`)
//! - `QUOTEDESK_SUBMIT_DELAY_MS` - Delay before a new quote is finalized
//!   (default: 800)
//! - `QUOTEDESK_SEED_ON_FIRST_RUN` - Seed demo quotes when no snapshot exists
//!   (default: true)
//! - `QUOTEDESK_LOG_FORMAT` - `text` or `json` (default: text)
//! - `RUST_LOG` - Tracing filter (default: `quotedesk_cli=info,quotedesk_core=info`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".quotedesk";
const DEFAULT_SUBMIT_DELAY_MS: &str = "800";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage directory
    pub data_dir: PathBuf,
    /// Artificial delay before a submitted quote is committed
    pub submit_delay: Duration,
    /// Seed demo quotes when storage holds no snapshot
    pub seed_on_first_run: bool,
    /// Log output format
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        let data_dir = PathBuf::from(get_or("QUOTEDESK_DATA_DIR", DEFAULT_DATA_DIR));

        let delay_ms = get_or("QUOTEDESK_SUBMIT_DELAY_MS", DEFAULT_SUBMIT_DELAY_MS)
            .trim()
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("QUOTEDESK_SUBMIT_DELAY_MS".to_string(), e.to_string())
            })?;

        let seed_on_first_run = parse_bool(
            "QUOTEDESK_SEED_ON_FIRST_RUN",
            &get_or("QUOTEDESK_SEED_ON_FIRST_RUN", "true"),
        )?;

        let log_format = match get_or("QUOTEDESK_LOG_FORMAT", "text").trim() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "QUOTEDESK_LOG_FORMAT".to_string(),
                    format!("expected `text` or `json`, got `{other}`"),
                ));
            }
        };

        Ok(Self {
            data_dir,
            submit_delay: Duration::from_millis(delay_ms),
            seed_on_first_run,
            log_format,
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got `{other}`"),
        )),
    }
}
