//! Configuration management for AeroCast

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL the `/api/v1/...` endpoint paths are appended to
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Authenticate against the built-in offline mock instead of the API
    #[serde(default)]
    pub mock_auth: bool,

    /// Simulate network latency in the mock authenticator
    #[serde(default = "default_true")]
    pub mock_latency: bool,

    /// Directory used as session storage (defaults to ~/.aerocast/session)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_dir: Option<PathBuf>,

    /// Response cache settings
    #[serde(default)]
    pub cache: CachePreferences,
}

/// Response cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachePreferences {
    /// Whether GET responses are cached at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// How long a cached response stays fresh
    #[serde(default = "default_stale_time_secs")]
    pub stale_time_secs: u64,

    /// Cache directory (defaults to the platform cache dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

fn default_api_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_stale_time_secs() -> u64 {
    5 * 60
}

fn default_true() -> bool {
    true
}

impl Default for CachePreferences {
    fn default() -> Self {
        Self {
            enabled: true,
            stale_time_secs: default_stale_time_secs(),
            dir: None,
        }
    }
}

impl CachePreferences {
    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_time_secs)
    }
}

impl Config {
    /// Get the AeroCast home directory (~/.aerocast)
    pub fn home_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".aerocast"))
    }

    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::home_dir()?.join("config.yaml"))
    }

    /// Resolve the config path from an optional override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional path, falling back to defaults
    /// when the file does not exist yet.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(&Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to an optional path
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(&Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Apply a base URL override (CLI flag or environment)
    pub fn with_api_base_url(mut self, url: Option<&str>) -> Result<Self> {
        if let Some(url) = url {
            self.api_base_url = url.to_string();
            self.validate()?;
        }
        Ok(self)
    }

    /// Check that the base URL is an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.api_base_url).map_err(|e| {
            ConfigError::Invalid(format!("api_base_url '{}': {}", self.api_base_url, e))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "api_base_url must use http or https, got '{}'",
                parsed.scheme()
            ))
            .into());
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be positive".to_string()).into());
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Directory backing session storage
    pub fn session_dir(&self) -> Result<PathBuf> {
        match &self.session_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::home_dir()?.join("session")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            mock_auth: false,
            mock_latency: true,
            session_dir: None,
            cache: CachePreferences::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(!config.mock_auth);
        assert!(config.cache.enabled);
        assert_eq!(config.cache.stale_time(), Duration::from_secs(300));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = Config {
            api_base_url: "https://api.aerocast.example".to_string(),
            mock_auth: true,
            session_dir: Some(dir.path().join("session")),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_base_url, "https://api.aerocast.example");
        assert!(loaded.mock_auth);
        assert_eq!(loaded.session_dir().unwrap(), dir.path().join("session"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "mock_auth: true\ncache:\n  enabled: false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.mock_auth);
        assert!(config.mock_latency);
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.stale_time_secs, 300);
        assert_eq!(config.api_base_url, "http://localhost:3000");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = Config::default().with_api_base_url(Some("not a url"));
        assert!(result.is_err());

        let result = Config::default().with_api_base_url(Some("ftp://example.com"));
        assert!(result.is_err());
    }

    #[test]
    fn test_base_url_override() {
        let config = Config::default()
            .with_api_base_url(Some("http://127.0.0.1:8080"))
            .unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:8080");
    }
}
