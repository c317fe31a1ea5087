//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and validated afterwards.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("chat.cache_length cannot be 0")]
    InvalidCacheLength,

    #[error("provider.model cannot be empty")]
    EmptyModelName,
}

/// Raw session cache configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Maximum messages retained per session
    pub cache_length: usize,
    /// Session storage directory (platform cache dir when unset)
    pub cache_path: Option<PathBuf>,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            cache_length: 100,
            cache_path: None,
        }
    }
}

/// Raw completion provider configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of an OpenAI-compatible API
    pub api_base: String,
    /// Model name sent with every request
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Path to the readline history file (platform data dir when unset)
    pub history_file: Option<PathBuf>,
}

/// Complete raw configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub chat: FileChatConfig,
    pub provider: FileProviderConfig,
    pub output: FileOutputConfig,
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.chat.cache_length == 0 {
            return Err(ConfigValidationError::InvalidCacheLength);
        }
        if self.provider.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        Ok(())
    }

    /// The session storage directory, explicit or platform-derived.
    pub fn storage_dir(&self) -> PathBuf {
        self.chat.cache_path.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("parley")
                .join("sessions")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chat.cache_length, 100);
        assert!(config.output.color);
    }

    #[test]
    fn zero_cache_length_fails_validation() {
        let mut config = FileConfig::default();
        config.chat.cache_length = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidCacheLength)
        ));
    }

    #[test]
    fn empty_model_fails_validation() {
        let mut config = FileConfig::default();
        config.provider.model = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyModelName)
        ));
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [chat]
            cache_length = 7

            [provider]
            model = "local-llama"
            "#,
        )
        .unwrap();

        assert_eq!(config.chat.cache_length, 7);
        assert_eq!(config.provider.model, "local-llama");
        assert_eq!(config.provider.api_key_env, "OPENAI_API_KEY");
        assert!(config.output.color);
    }

    #[test]
    fn explicit_cache_path_wins_over_platform_dir() {
        let mut config = FileConfig::default();
        config.chat.cache_path = Some(PathBuf::from("/tmp/parley-test"));
        assert_eq!(config.storage_dir(), PathBuf::from("/tmp/parley-test"));
    }
}
