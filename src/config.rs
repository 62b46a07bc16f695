use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::sync::DEFAULT_SERVER_URL;

/// Sync configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Base URL of the key-addressed remote blob store
    pub server_url: String,
    /// Push automatically after local mutations (default: true)
    pub auto_push: bool,
    /// Quiet period before a scheduled push fires, in milliseconds
    pub debounce_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            auto_push: true,
            debounce_ms: 2500,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding locally persisted tracker state
    pub data_dir: PathBuf,
    /// Sync configuration
    pub sync: SyncConfig,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing the config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    sync: Option<SyncConfig>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut data_dir = Self::default_data_dir();
        let mut sync = SyncConfig::default();
        let mut config_file = None;

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::Read(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::Parse(path.clone(), e))?;

            config_file = Some(path);

            if let Some(dir) = file_config.data_dir {
                data_dir = dir;
            }
            if let Some(sync_config) = file_config.sync {
                sync = sync_config;
            }
        }

        // Apply environment variable overrides
        if let Ok(dir) = std::env::var("HYDROTRACK_DATA_DIR") {
            data_dir = PathBuf::from(dir);
        }
        if let Ok(url) = std::env::var("HYDROTRACK_SYNC_URL") {
            sync.server_url = url;
        }

        Ok(Self {
            data_dir,
            sync,
            config_file,
        })
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/hydrotrack/
    /// - macOS: ~/Library/Application Support/hydrotrack/
    /// - Windows: %APPDATA%/hydrotrack/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hydrotrack")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hydrotrack")
            .join("config.yaml")
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {}", .0.display(), .1)]
    Read(PathBuf, std::io::Error),
    #[error("Failed to parse config file '{}': {}", .0.display(), .1)]
    Parse(PathBuf, serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_no_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.sync.server_url, DEFAULT_SERVER_URL);
        assert!(config.sync.auto_push);
        assert_eq!(config.sync.debounce_ms, 2500);
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_dir: /custom/path").unwrap();
        writeln!(file, "sync:").unwrap();
        writeln!(file, "  server_url: https://bins.example.com").unwrap();
        writeln!(file, "  auto_push: false").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/path"));
        assert_eq!(config.sync.server_url, "https://bins.example.com");
        assert!(!config.sync.auto_push);
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_partial_file_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "sync:").unwrap();
        writeln!(file, "  debounce_ms: 2000").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.sync.debounce_ms, 2000);
        // Unspecified fields keep their defaults.
        assert_eq!(config.sync.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.data_dir, Config::default_data_dir());
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    #[ignore] // Run with --ignored; env vars can pollute parallel tests
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "sync:").unwrap();
        writeln!(file, "  server_url: https://fromfile.example.com").unwrap();

        std::env::set_var("HYDROTRACK_SYNC_URL", "https://fromenv.example.com");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.sync.server_url, "https://fromenv.example.com");

        std::env::remove_var("HYDROTRACK_SYNC_URL");
    }
}
