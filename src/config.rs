//! Bot configuration read from the environment

use std::time::Duration;
use thiserror::Error;

const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
const DEFAULT_CATALOG_URL: &str = "https://www.themealdb.com/api/json/v1/1";
const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),
    #[error("unknown RECIPE_BOT_MODE {0:?} (expected \"polling\" or \"webhook\")")]
    InvalidMode(String),
}

/// How updates reach the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportMode {
    Polling {
        timeout_secs: u64,
    },
    Webhook {
        port: u16,
        public_url: String,
        secret: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram_token: String,
    pub telegram_api_url: String,
    pub catalog_url: String,
    pub catalog_timeout: Duration,
    pub mode: TransportMode,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let telegram_token = non_blank("TELEGRAM_TOKEN").ok_or(ConfigError::Missing("TELEGRAM_TOKEN"))?;

        let catalog_timeout_secs = non_blank("RECIPE_CATALOG_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_CATALOG_TIMEOUT_SECS);

        let mode_name = non_blank("RECIPE_BOT_MODE").unwrap_or_else(|| "polling".to_string());
        let mode = match mode_name.trim().to_ascii_lowercase().as_str() {
            "polling" => TransportMode::Polling {
                timeout_secs: non_blank("RECIPE_BOT_POLL_TIMEOUT_SECS")
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(DEFAULT_POLL_TIMEOUT_SECS),
            },
            "webhook" => TransportMode::Webhook {
                port: non_blank("RECIPE_BOT_PORT")
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(DEFAULT_PORT),
                public_url: non_blank("RECIPE_BOT_WEBHOOK_URL")
                    .ok_or(ConfigError::Missing("RECIPE_BOT_WEBHOOK_URL"))?,
                secret: non_blank("RECIPE_BOT_WEBHOOK_SECRET"),
            },
            _ => return Err(ConfigError::InvalidMode(mode_name)),
        };

        Ok(Self {
            telegram_token,
            telegram_api_url: non_blank("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            catalog_url: non_blank("RECIPE_CATALOG_URL")
                .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string()),
            catalog_timeout: Duration::from_secs(catalog_timeout_secs),
            mode,
        })
    }
}
