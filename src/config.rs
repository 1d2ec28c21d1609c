// src/config.rs

use crate::constants::{
    DEFAULT_BACKEND_URL, DEFAULT_NEW_CHAT_DELAY_MS, DEFAULT_REPLY_DELAY_BASE_MS,
    DEFAULT_REPLY_DELAY_JITTER_MS, DEFAULT_WELCOME_DELAY_MS,
};
use crate::errors::{ChatPalError, ChatPalResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backend_url: String,
    pub reply_delay_base_ms: u64,
    pub reply_delay_jitter_ms: u64,
    pub welcome_delay_ms: u64,
    pub new_chat_delay_ms: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            reply_delay_base_ms: DEFAULT_REPLY_DELAY_BASE_MS,
            reply_delay_jitter_ms: DEFAULT_REPLY_DELAY_JITTER_MS,
            welcome_delay_ms: DEFAULT_WELCOME_DELAY_MS,
            new_chat_delay_ms: DEFAULT_NEW_CHAT_DELAY_MS,
            log_level: "info".to_string(),
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

pub fn initialize_config() -> ChatPalResult<()> {
    let config_path = get_config_path()?;
    let config = load_or_create(&config_path)?;
    *CONFIG.write().unwrap() = config;
    Ok(())
}

/// Loads the config file if present, otherwise writes one with defaults.
/// `CHATPAL_BACKEND_URL` always takes precedence over the file.
fn load_or_create(config_path: &Path) -> ChatPalResult<Config> {
    let mut config = if config_path.exists() {
        let config_str = fs::read_to_string(config_path).map_err(|e| {
            ChatPalError::config_error(format!("Failed to read config file: {}", e))
        })?;

        serde_json::from_str(&config_str)
            .map_err(|e| ChatPalError::config_error(format!("Failed to parse config: {}", e)))?
    } else {
        let config = Config::default();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ChatPalError::config_error(format!("Failed to create config directory: {}", e))
            })?;
        }

        let config_str = serde_json::to_string_pretty(&config).map_err(|e| {
            ChatPalError::config_error(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(config_path, config_str).map_err(|e| {
            ChatPalError::config_error(format!("Failed to write config file: {}", e))
        })?;

        config
    };

    if let Ok(url) = env::var("CHATPAL_BACKEND_URL") {
        config.backend_url = url;
    }

    validate_config(&config)?;
    Ok(config)
}

fn get_config_path() -> ChatPalResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ChatPalError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("chatpal").join("config.json"))
}

fn validate_config(config: &Config) -> ChatPalResult<()> {
    if config.backend_url.is_empty() {
        return Err(ChatPalError::config_error("Backend URL is required"));
    }

    if !config.backend_url.starts_with("http://") && !config.backend_url.starts_with("https://") {
        return Err(ChatPalError::config_error(
            "Backend URL must start with http:// or https://",
        ));
    }

    if config.log_level.is_empty() {
        return Err(ChatPalError::config_error("Log level is required"));
    }

    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_config_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_empty_backend_url() {
        let mut config = Config::default();
        config.backend_url = "".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_rejects_bad_scheme() {
        let mut config = Config::default();
        config.backend_url = "ftp://127.0.0.1:5000".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.reply_delay_base_ms, DEFAULT_REPLY_DELAY_BASE_MS);

        // A second load reads the file it just wrote.
        let reloaded = load_or_create(&path).unwrap();
        assert_eq!(reloaded.new_chat_delay_ms, config.new_chat_delay_ms);
    }
}
