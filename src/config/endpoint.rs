//! Relay endpoint configuration

use crate::error::{ConfigError, Result};
use crate::relay::Endpoint;
use serde::{Deserialize, Serialize};

/// Configuration for a single relay endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Short region name (e.g. "ny", "fra")
    pub name: String,
    /// Base URL, without the submission path
    pub url: String,
    /// Optional note about the endpoint
    #[serde(default)]
    pub note: Option<String>,
    /// Whether this endpoint is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl EndpointConfig {
    /// Create a new endpoint config with defaults
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            note: None,
            enabled: true,
        }
    }

    /// Builder-style setter for note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Builder-style setter for enabled
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Parse a `NAME=URL` pair as given on the command line
    pub fn parse_pair(pair: &str) -> Result<Self> {
        let (name, url) = pair.split_once('=').ok_or_else(|| {
            ConfigError::InvalidEndpoint(format!("expected NAME=URL, got '{}'", pair))
        })?;
        Ok(Self::new(name.trim(), url.trim()))
    }

    /// Validate and convert into a runtime endpoint
    pub fn to_endpoint(&self) -> Result<Endpoint> {
        Endpoint::new(&self.name, &self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_config() {
        let config = EndpointConfig::new("ny", "http://ny.flashblock.trade").with_note("US East");

        assert_eq!(config.name, "ny");
        assert_eq!(config.url, "http://ny.flashblock.trade");
        assert_eq!(config.note.as_deref(), Some("US East"));
        assert!(config.enabled);
    }

    #[test]
    fn test_parse_pair() {
        let config = EndpointConfig::parse_pair("local=http://127.0.0.1:8080").unwrap();
        assert_eq!(config.name, "local");
        assert_eq!(config.url, "http://127.0.0.1:8080");

        assert!(EndpointConfig::parse_pair("no-separator").is_err());
    }

    #[test]
    fn test_to_endpoint_rejects_bad_url() {
        assert!(EndpointConfig::new("bad", "not a url").to_endpoint().is_err());
        assert!(EndpointConfig::new("", "http://ok.example").to_endpoint().is_err());
        assert!(EndpointConfig::new("ftp", "ftp://files.example").to_endpoint().is_err());
    }
}
