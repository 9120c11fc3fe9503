//! Configuration and settings management
//!
//! Loads settings from config files and environment variables and defines
//! the constants shared by the panel client and transports.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed endpoint of the SMM panel API.
pub const DEFAULT_PANEL_API_URL: &str = "https://xpsmm.com/api/v2";
/// Default timeout for a single panel request.
pub const DEFAULT_PANEL_HTTP_TIMEOUT_SECS: u64 = 30;

// Telegram API retry configuration
/// Maximum retry attempts for Telegram API calls
pub const TELEGRAM_API_MAX_RETRIES: usize = 3;
/// Initial backoff for Telegram API retries
pub const TELEGRAM_API_INITIAL_BACKOFF_MS: u64 = 500;
/// Upper bound for a single Telegram API backoff
pub const TELEGRAM_API_MAX_BACKOFF_MS: u64 = 4000;

/// Settings for talking to the SMM panel.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PanelSettings {
    /// Panel API endpoint
    #[serde(default = "default_panel_api_url")]
    pub panel_api_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_panel_http_timeout_secs")]
    pub panel_http_timeout_secs: u64,
}

fn default_panel_api_url() -> String {
    DEFAULT_PANEL_API_URL.to_string()
}

const fn default_panel_http_timeout_secs() -> u64 {
    DEFAULT_PANEL_HTTP_TIMEOUT_SECS
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            panel_api_url: default_panel_api_url(),
            panel_http_timeout_secs: default_panel_http_timeout_secs(),
        }
    }
}

impl PanelSettings {
    /// Create new settings by loading from environment and files
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails.
    pub fn new() -> Result<Self, ConfigError> {
        build_config()?.try_deserialize()
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.panel_http_timeout_secs)
    }
}

/// Build the layered configuration shared by all settings structs.
///
/// Sources, lowest priority first: `config/default`, `config/{RUN_MODE}`,
/// `config/local`, `APP__*` variables, then plain environment variables.
///
/// # Errors
///
/// Returns a `ConfigError` if any source is malformed.
pub fn build_config() -> Result<Config, ConfigError> {
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
        // Local overrides, not checked into git
        .add_source(File::with_name("config/local").required(false))
        // Eg.. `APP__PANEL_API_URL=... ./target/app`
        .add_source(Environment::with_prefix("APP").separator("__"))
        // UPPER_SNAKE_CASE variables map onto snake_case keys; empty values count as unset
        .add_source(Environment::default().ignore_empty(true))
        .build()
}
