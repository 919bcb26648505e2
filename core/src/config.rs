use crate::errors::{TripError, TripResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "trip-assistant";
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_RECENT_LIMIT: u32 = 6;
pub const MAX_RECENT_LIMIT: u32 = 50;
pub const DEFAULT_FOLLOW_UP_DELAY_MS: u64 = 1000;

/// Environment variable overriding the configured base URL
pub const API_URL_ENV: &str = "TRIP_API_URL";

/// Configuration for the trip assistant clients
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct TripConfig {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub data_dir: Option<PathBuf>,
    pub recent_limit: Option<u32>,
    pub chat_follow_up_delay_ms: Option<u64>,
    pub log_level: Option<String>,
}

impl TripConfig {
    /// Loads configuration from a file if it exists, otherwise returns the default config
    pub fn load_from_file(path: &Path) -> TripResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| TripError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| TripError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Saves configuration to a file
    pub fn save_to_file(&self, path: &Path) -> TripResult<()> {
        let content = toml::to_string(self)
            .map_err(|e| TripError::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                TripError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        fs::write(path, content)
            .map_err(|e| TripError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Merges this config with another config, preferring values from the other config if present
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            api_url: other.api_url.clone().or_else(|| self.api_url.clone()),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            data_dir: other.data_dir.clone().or_else(|| self.data_dir.clone()),
            recent_limit: other.recent_limit.or(self.recent_limit),
            chat_follow_up_delay_ms: other.chat_follow_up_delay_ms.or(self.chat_follow_up_delay_ms),
            log_level: other.log_level.clone().or_else(|| self.log_level.clone()),
        }
    }

    /// Overlay built from the process environment
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var(API_URL_ENV).ok().filter(|v| !v.trim().is_empty()),
            ..Self::default()
        }
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> String {
        self.api_url
            .as_deref()
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn recent_limit(&self) -> u32 {
        self.recent_limit
            .unwrap_or(DEFAULT_RECENT_LIMIT)
            .clamp(1, MAX_RECENT_LIMIT)
    }

    pub fn follow_up_delay(&self) -> Duration {
        Duration::from_millis(
            self.chat_follow_up_delay_ms
                .unwrap_or(DEFAULT_FOLLOW_UP_DELAY_MS),
        )
    }

    /// Directory holding the persisted token and trip cache
    pub fn data_dir(&self) -> TripResult<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let base = dirs::data_dir().ok_or_else(|| {
            TripError::Config("Could not determine data directory".to_string())
        })?;
        Ok(base.join(APP_NAME))
    }
}

/// Helper function to get default config directory
pub fn get_default_config_dir(app_name: &str) -> TripResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| TripError::Config("Could not determine home directory".to_string()))?;

    Ok(home_dir.join(".config").join(app_name))
}

/// Helper function to get default config file path
pub fn get_default_config_file(app_name: &str) -> TripResult<PathBuf> {
    let config_dir = get_default_config_dir(app_name)?;
    Ok(config_dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TripConfig::default();
        assert_eq!(config.base_url(), DEFAULT_API_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.recent_limit(), 6);
        assert_eq!(config.follow_up_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let config = TripConfig {
            api_url: Some("https://example.test/api/".to_string()),
            ..TripConfig::default()
        };
        assert_eq!(config.base_url(), "https://example.test/api");
    }

    #[test]
    fn test_recent_limit_stays_in_server_range() {
        let zero = TripConfig {
            recent_limit: Some(0),
            ..TripConfig::default()
        };
        assert_eq!(zero.recent_limit(), 1);

        let huge = TripConfig {
            recent_limit: Some(500),
            ..TripConfig::default()
        };
        assert_eq!(huge.recent_limit(), MAX_RECENT_LIMIT);
    }

    #[test]
    fn test_merge_prefers_other() {
        let file = TripConfig {
            api_url: Some("http://file".to_string()),
            timeout_secs: Some(30),
            recent_limit: Some(3),
            ..TripConfig::default()
        };
        let overlay = TripConfig {
            api_url: Some("http://env".to_string()),
            ..TripConfig::default()
        };

        let merged = file.merge(&overlay);
        assert_eq!(merged.api_url.as_deref(), Some("http://env"));
        assert_eq!(merged.timeout_secs, Some(30));
        assert_eq!(merged.recent_limit, Some(3));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = TripConfig {
            api_url: Some("http://127.0.0.1:9000/api".to_string()),
            log_level: Some("debug".to_string()),
            ..TripConfig::default()
        };
        config.save_to_file(&path).unwrap();

        let loaded = TripConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = TripConfig::load_from_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, TripConfig::default());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = \"soon\"").unwrap();

        let err = TripConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, TripError::Config(_)));
    }
}
