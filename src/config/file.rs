//! Configuration file handling

use super::{ClientConfig, EndpointConfig};
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Custom endpoints (a name matching a default endpoint replaces it)
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,

    /// Disabled endpoints
    #[serde(default)]
    pub disabled_endpoints: DisabledEndpoints,

    /// Authorization header value
    #[serde(default)]
    pub auth_header: Option<String>,
}

/// Global settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Probe timeout in milliseconds
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Submission timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Retries on 429/5xx
    #[serde(default = "default_retries")]
    pub retry_attempts: u32,

    /// Pooled connections kept per endpoint
    #[serde(default = "default_pool_size")]
    pub pool_max_idle_per_host: usize,

    /// Concurrent requests allowed per endpoint
    #[serde(default = "default_max_connections")]
    pub max_connections_per_host: usize,
}

fn default_probe_timeout_ms() -> u64 {
    super::client::DEFAULT_PROBE_TIMEOUT.as_millis() as u64
}

fn default_timeout() -> u64 {
    super::client::DEFAULT_SUBMIT_TIMEOUT.as_secs()
}

fn default_retries() -> u32 {
    super::client::DEFAULT_MAX_RETRIES
}

fn default_pool_size() -> usize {
    super::client::DEFAULT_POOL_MAX_IDLE_PER_HOST
}

fn default_max_connections() -> usize {
    super::client::DEFAULT_MAX_CONNECTIONS_PER_HOST
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            probe_timeout_ms: default_probe_timeout_ms(),
            timeout_seconds: default_timeout(),
            retry_attempts: default_retries(),
            pool_max_idle_per_host: default_pool_size(),
            max_connections_per_host: default_max_connections(),
        }
    }
}

/// Disabled endpoints configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisabledEndpoints {
    /// Endpoint names to skip
    #[serde(default)]
    pub names: Vec<String>,
}

impl ConfigFile {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("flashblock")
            .join("config.toml")
    }

    /// Load from default path
    pub fn load_default() -> Result<Option<Self>> {
        let path = Self::default_path();
        if path.exists() {
            Ok(Some(Self::load(&path)?))
        } else {
            Ok(None)
        }
    }

    /// Load from a specific path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::InvalidFile(format!("{}: {}", path.display(), e)))?;

        let config: Self = toml::from_str(&content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Save to a specific path
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::InvalidFile(format!("Failed to create directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidFile(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::InvalidFile(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Check if an endpoint name is disabled
    pub fn is_endpoint_disabled(&self, name: &str) -> bool {
        self.disabled_endpoints.names.iter().any(|n| n == name)
    }

    /// Convert settings to runtime client tuning
    pub fn client_config(&self) -> Result<ClientConfig> {
        let config = ClientConfig::default()
            .with_probe_timeout(Duration::from_millis(self.settings.probe_timeout_ms))
            .with_submit_timeout(Duration::from_secs(self.settings.timeout_seconds))
            .with_max_retries(self.settings.retry_attempts)
            .with_pool_max_idle_per_host(self.settings.pool_max_idle_per_host)
            .with_max_connections_per_host(self.settings.max_connections_per_host);
        config.validate()?;
        Ok(config)
    }

    /// Non-empty, trimmed auth header from the file
    pub fn credential(&self) -> Option<String> {
        self.auth_header
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
auth_header = "  secret-token "

[settings]
probe_timeout_ms = 800
retry_attempts = 4

[[endpoints]]
name = "local"
url = "http://127.0.0.1:9000"
note = "dev relay"

[disabled_endpoints]
names = ["london"]
"#;

        let config: ConfigFile = toml::from_str(toml).unwrap();
        assert_eq!(config.settings.probe_timeout_ms, 800);
        assert_eq!(config.settings.timeout_seconds, 10);
        assert_eq!(config.endpoints.len(), 1);
        assert_eq!(config.endpoints[0].name, "local");
        assert!(config.endpoints[0].enabled);
        assert!(config.is_endpoint_disabled("london"));
        assert!(!config.is_endpoint_disabled("ny"));
        assert_eq!(config.credential(), Some("secret-token".to_string()));

        let client = config.client_config().unwrap();
        assert_eq!(client.probe_timeout, Duration::from_millis(800));
        assert_eq!(client.max_retries, 4);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ConfigFile = toml::from_str("").unwrap();
        assert_eq!(config.client_config().unwrap(), ClientConfig::default());
        assert_eq!(config.credential(), None);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config: ConfigFile = toml::from_str("[settings]\ntimeout_seconds = 0\n").unwrap();
        let err = config.client_config().unwrap_err();
        assert!(err.to_string().contains("submit timeout must be greater than zero"));

        let config: ConfigFile = toml::from_str("[settings]\nprobe_timeout_ms = 0\n").unwrap();
        assert!(config.client_config().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = ConfigFile::default();
        config.endpoints.push(EndpointConfig::new("x", "http://x.example"));
        config.save(&path).unwrap();

        let loaded = ConfigFile::load(&path).unwrap();
        assert_eq!(loaded.endpoints, config.endpoints);
    }

    #[test]
    fn test_default_path() {
        let path = ConfigFile::default_path();
        assert!(path.to_string_lossy().contains("flashblock"));
    }
}
