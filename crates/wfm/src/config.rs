//! Configuration management for wfm.
//!
//! Configuration is loaded from multiple sources with precedence:
//! 1. Command-line flags
//! 2. Environment variables (WFM_*)
//! 3. Config file (~/.wfm/config.toml or the platform data dir)
//! 4. Default values

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use wfm_core::types::{DEFAULT_MAX_CALLS_PER_AGENT, DEFAULT_NUM_AGENTS};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Planning service settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Default forecast window
    #[serde(default)]
    pub forecast: ForecastConfig,

    /// Default staffing parameters
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the planning service
    #[serde(default = "default_api_url")]
    pub url: String,

    /// Per-request timeout; requests wait indefinitely when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    #[serde(default = "default_start_week")]
    pub start_week: u32,

    #[serde(default = "default_end_week")]
    pub end_week: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_num_agents")]
    pub num_agents: u32,

    #[serde(default = "default_max_calls_per_agent")]
    pub max_calls_per_agent: u32,
}

// Default value functions
fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_start_week() -> u32 {
    1
}

fn default_end_week() -> u32 {
    5
}

fn default_num_agents() -> u32 {
    DEFAULT_NUM_AGENTS
}

fn default_max_calls_per_agent() -> u32 {
    DEFAULT_MAX_CALLS_PER_AGENT
}

fn default_data_dir() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("dev", "wfm", "wfm") {
        proj_dirs.data_dir().to_path_buf()
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".wfm")
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            timeout_secs: None,
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            start_week: default_start_week(),
            end_week: default_end_week(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            num_agents: default_num_agents(),
            max_calls_per_agent: default_max_calls_per_agent(),
        }
    }
}

impl Config {
    /// Load configuration from the default file location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, falling back to defaults.
    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file {:?}", config_path))?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to a file.
    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the config file path.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("WFM_CONFIG") {
            PathBuf::from(path)
        } else {
            default_data_dir().join("config.toml")
        }
    }

    /// Apply a URL given on the command line or through WFM_API_URL.
    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.api.url = url;
        }
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.api.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.api.url, "http://localhost:8000");
        assert!(config.api.timeout_secs.is_none());
        assert!(config.timeout().is_none());

        assert_eq!(config.forecast.start_week, 1);
        assert_eq!(config.forecast.end_week, 5);

        assert_eq!(config.schedule.num_agents, 10);
        assert_eq!(config.schedule.max_calls_per_agent, 40);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            timeout_secs = 15

            [schedule]
            num_agents = 25
            "#,
        )
        .expect("Failed to parse partial config");

        assert_eq!(config.api.url, "http://localhost:8000");
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.schedule.num_agents, 25);
        assert_eq!(config.schedule.max_calls_per_agent, 40);
        assert_eq!(config.forecast, ForecastConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = tempdir().expect("Failed to create temp dir");
        let path = temp.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.api.url = "http://planner:9000".to_string();
        config.forecast.end_week = 12;

        config.save_to(&path).expect("Failed to save config");
        assert!(path.exists());

        let loaded = Config::load_from(&path).expect("Failed to load config");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp = tempdir().expect("Failed to create temp dir");
        let loaded = Config::load_from(&temp.path().join("missing.toml"))
            .expect("Failed to load default config");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_load_invalid_file_errors() {
        let temp = tempdir().expect("Failed to create temp dir");
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[api\nurl = ").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_api_url_override() {
        let config = Config::default().with_api_url(Some("http://override".into()));
        assert_eq!(config.api.url, "http://override");

        let config = Config::default().with_api_url(None);
        assert_eq!(config.api.url, "http://localhost:8000");
    }
}
