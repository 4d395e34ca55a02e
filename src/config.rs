use std::fmt;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://li.quest/v1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PRIVATE_KEY not found in environment")]
    MissingPrivateKey,
}

#[derive(Clone)]
pub struct BridgeConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    // Presence-checked only. Nothing in this tool signs.
    #[allow(dead_code)]
    pub private_key: String,
}

impl fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl BridgeConfig {
    /// Reads the configuration from the process environment. Call
    /// `dotenv::dotenv()` beforehand to pick up a local `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let private_key = non_empty("PRIVATE_KEY").ok_or(ConfigError::MissingPrivateKey)?;
        let api_url = non_empty("LIFI_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_key = non_empty("LIFI_API_KEY");

        Ok(BridgeConfig {
            api_url,
            api_key,
            private_key,
        })
    }
}
