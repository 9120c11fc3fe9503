//! Telegram transport settings.

use config::ConfigError;
use orderdesk_core::config::PanelSettings;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Telegram transport settings loaded from environment variables.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TelegramSettings {
    /// Telegram Bot API token (`BOT_TOKEN`).
    pub bot_token: String,
}

impl TelegramSettings {
    /// Create new settings by loading from environment and files.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails or the token is missing.
    pub fn new() -> Result<Self, ConfigError> {
        let settings: Self = orderdesk_core::config::build_config()?.try_deserialize()?;
        if settings.bot_token.trim().is_empty() {
            return Err(ConfigError::NotFound("bot_token".to_string()));
        }
        Ok(settings)
    }
}

/// Combined settings used by the Telegram transport layer.
#[derive(Clone)]
pub struct BotSettings {
    /// Panel settings shared across transport handlers.
    pub panel: Arc<PanelSettings>,
    /// Telegram-specific settings.
    pub telegram: Arc<TelegramSettings>,
}

impl BotSettings {
    /// Create a new combined settings bundle.
    #[must_use]
    pub fn new(panel: PanelSettings, telegram: TelegramSettings) -> Self {
        Self {
            panel: Arc::new(panel),
            telegram: Arc::new(telegram),
        }
    }
}
