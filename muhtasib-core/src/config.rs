//! Dashboard configuration (TOML).
//!
//! Every section has defaults, so an empty or partial file is valid. The base
//! address is injected into the API client from here; nothing reads it from a
//! global.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable that overrides `api.base_url`.
pub const BASE_URL_ENV: &str = "MUHTASIB_API_URL";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8888";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("base URL must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),

    #[error("poll interval must be positive")]
    ZeroPollInterval,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub interval_ms: u64,
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { interval_ms: 1000 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log file; the terminal belongs to the UI.
    pub file: PathBuf,
    /// `tracing` filter directive, e.g. `info` or `muhtasib_core=debug`.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("muhtasib.log"),
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api: ApiConfig,
    pub poll: PollConfig,
    pub log: LogConfig,
}

impl DashboardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `path`; a missing file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply the first present override, in priority order.
    pub fn override_base_url<I>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        if let Some(url) = candidates.into_iter().flatten().find(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.api.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(url.clone()));
        }
        if self.poll.interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = DashboardConfig::from_toml_str("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.poll.interval(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = DashboardConfig::from_toml_str(
            r#"
            [api]
            base_url = "http://192.168.1.200:8888"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://192.168.1.200:8888");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn override_takes_first_present_candidate() {
        let config = DashboardConfig::default().override_base_url([
            None,
            Some("  ".to_string()),
            Some("https://env.example".to_string()),
            Some("https://ignored.example".to_string()),
        ]);
        assert_eq!(config.api.base_url, "https://env.example");

        let untouched = DashboardConfig::default().override_base_url([None, None]);
        assert_eq!(untouched.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = DashboardConfig::default();
        config.api.base_url = "localhost:8888".into();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBaseUrl(_))));

        let mut config = DashboardConfig::default();
        config.poll.interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroPollInterval)));
    }

    #[test]
    fn load_missing_and_present_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");

        assert!(matches!(DashboardConfig::load(&path), Err(ConfigError::Io { .. })));
        assert_eq!(
            DashboardConfig::load_or_default(&path).unwrap(),
            DashboardConfig::default()
        );

        std::fs::write(&path, "[poll]\ninterval_ms = 250\n").unwrap();
        let config = DashboardConfig::load_or_default(&path).unwrap();
        assert_eq!(config.poll.interval_ms, 250);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        assert!(matches!(
            DashboardConfig::from_toml_str("[api\nbase_url = 1"),
            Err(ConfigError::Parse(_))
        ));
    }
}
