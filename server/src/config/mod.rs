// Provider configuration for the chat and search collaborators
//
// Values come from CLI flags, which fall back to environment variables
// (MINIMAX_BASE_URL, MINIMAX_API_KEY, MINIMAX_MODEL, TAVILY_API_KEY).
// `.env.local` is loaded into the environment before flags are parsed.

use crate::clients::{OpenAiChatClient, TavilySearchClient};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Model used when none is configured
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

/// Chat endpoint used when no base URL is configured
pub const DEFAULT_CHAT_BASE_URL: &str = "https://api.openai.com/v1";

/// File loaded into the environment at startup, if present
pub const ENV_FILE: &str = ".env.local";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing chat provider API key (set MINIMAX_API_KEY or --chat-api-key)")]
    MissingChatApiKey,

    #[error("Missing search provider API key (set TAVILY_API_KEY or --search-api-key)")]
    MissingSearchApiKey,
}

/// Unvalidated configuration; every field may be absent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialProviderConfig {
    pub chat_base_url: Option<String>,
    pub chat_api_key: Option<String>,
    pub chat_model: Option<String>,
    pub search_api_key: Option<String>,
}

/// Validated provider configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub chat_base_url: String,
    pub chat_api_key: String,
    pub chat_model: String,
    pub search_api_key: String,
}

impl ProviderConfig {
    /// Apply defaults and check that both API keys are present
    pub fn from_partial(partial: PartialProviderConfig) -> Result<Self, ConfigError> {
        let chat_api_key = non_blank(partial.chat_api_key).ok_or(ConfigError::MissingChatApiKey)?;
        let search_api_key =
            non_blank(partial.search_api_key).ok_or(ConfigError::MissingSearchApiKey)?;

        Ok(Self {
            chat_base_url: non_blank(partial.chat_base_url)
                .unwrap_or_else(|| DEFAULT_CHAT_BASE_URL.to_string()),
            chat_api_key,
            chat_model: non_blank(partial.chat_model)
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            search_api_key,
        })
    }

    pub fn chat_client(&self) -> OpenAiChatClient {
        OpenAiChatClient::new(&self.chat_base_url, &self.chat_api_key, &self.chat_model)
    }

    pub fn search_client(&self) -> TavilySearchClient {
        TavilySearchClient::new(&self.search_api_key)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Load `path` into the process environment if it exists.
///
/// Variables already set in the environment win over the file.
pub fn load_env_file(path: &Path) {
    if !path.exists() {
        log::debug!("No {} found, using process environment only", path.display());
        return;
    }

    match dotenv::from_path(path) {
        Ok(()) => log::info!("Loaded environment from {}", path.display()),
        Err(e) => log::warn!("Failed to load {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> PartialProviderConfig {
        PartialProviderConfig {
            chat_base_url: Some("https://api.minimax.io/v1".to_string()),
            chat_api_key: Some("mm-key".to_string()),
            chat_model: Some("MiniMax-M2".to_string()),
            search_api_key: Some("tvly-key".to_string()),
        }
    }

    #[test]
    fn test_from_partial_full() {
        let config = ProviderConfig::from_partial(full()).unwrap();
        assert_eq!(config.chat_base_url, "https://api.minimax.io/v1");
        assert_eq!(config.chat_model, "MiniMax-M2");
        assert_eq!(config.chat_client().model(), "MiniMax-M2");
    }

    #[test]
    fn test_from_partial_defaults_model_and_base_url() {
        let partial = PartialProviderConfig {
            chat_base_url: None,
            chat_model: Some("   ".to_string()),
            ..full()
        };
        let config = ProviderConfig::from_partial(partial).unwrap();
        assert_eq!(config.chat_model, DEFAULT_CHAT_MODEL);
        assert_eq!(config.chat_base_url, DEFAULT_CHAT_BASE_URL);
    }

    #[test]
    fn test_from_partial_missing_keys() {
        let no_chat = PartialProviderConfig {
            chat_api_key: None,
            ..full()
        };
        assert_eq!(
            ProviderConfig::from_partial(no_chat).unwrap_err(),
            ConfigError::MissingChatApiKey
        );

        let no_search = PartialProviderConfig {
            search_api_key: Some(String::new()),
            ..full()
        };
        assert_eq!(
            ProviderConfig::from_partial(no_search).unwrap_err(),
            ConfigError::MissingSearchApiKey
        );
    }
}
