//! Named relay endpoints and the registry that enumerates them

use crate::config::{ConfigFile, EndpointConfig};
use crate::error::{ConfigError, Result};
use crate::relay::default_endpoints;
use reqwest::Url;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Path the batch is POSTed to, relative to the endpoint base
pub const SUBMIT_PATH: &str = "/api/v2/submit-batch";

/// One geographic relay instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Endpoint {
    name: String,
    base_url: String,
}

impl Endpoint {
    /// Create an endpoint, validating the name and base URL
    pub fn new(name: impl Into<String>, base_url: impl AsRef<str>) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ConfigError::InvalidEndpoint("empty endpoint name".to_string()).into());
        }

        let raw = base_url.as_ref().trim();
        let url = Url::parse(raw)
            .map_err(|e| ConfigError::InvalidEndpoint(format!("{}: {} ({})", name, raw, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint(format!(
                "{}: unsupported scheme '{}'",
                name,
                url.scheme()
            ))
            .into());
        }

        Ok(Self {
            name,
            base_url: raw.trim_end_matches('/').to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Root URL used for liveness probes
    pub fn probe_url(&self) -> String {
        format!("{}/", self.base_url)
    }

    /// Batch submission URL
    pub fn submit_url(&self) -> String {
        format!("{}{}", self.base_url, SUBMIT_PATH)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.base_url)
    }
}

/// Fixed, ordered set of candidate endpoints.
///
/// A registry is never empty and names are unique; both are checked on
/// construction.
#[derive(Debug, Clone)]
pub struct EndpointRegistry {
    endpoints: Vec<Endpoint>,
}

impl EndpointRegistry {
    /// Create a registry from already-validated endpoints
    pub fn new(endpoints: Vec<Endpoint>) -> Result<Self> {
        if endpoints.is_empty() {
            return Err(ConfigError::NoEndpoints.into());
        }

        {
            let mut seen = HashSet::new();
            if let Some(dup) = endpoints.iter().find(|ep| !seen.insert(ep.name())) {
                return Err(ConfigError::DuplicateEndpoint(dup.name().to_string()).into());
            }
        }

        Ok(Self { endpoints })
    }

    /// Create from endpoint configs, skipping disabled entries
    pub fn from_configs(configs: &[EndpointConfig]) -> Result<Self> {
        let endpoints = configs
            .iter()
            .filter(|c| c.enabled)
            .map(EndpointConfig::to_endpoint)
            .collect::<Result<Vec<_>>>()?;
        Self::new(endpoints)
    }

    /// The built-in public endpoints
    pub fn with_defaults() -> Result<Self> {
        Self::from_configs(&default_endpoints())
    }

    /// Build the effective endpoint set.
    ///
    /// Starts from the defaults, applies config-file endpoints (same name
    /// replaces in place, new names append), drops names disabled in the file
    /// or listed in `exclude`, then appends `extra`.
    pub fn assemble(
        config_file: Option<&ConfigFile>,
        extra: &[EndpointConfig],
        exclude: &[String],
    ) -> Result<Self> {
        let mut configs = default_endpoints();

        if let Some(cf) = config_file {
            for endpoint in &cf.endpoints {
                upsert(&mut configs, endpoint.clone());
            }
            configs.retain(|c| !cf.is_endpoint_disabled(&c.name));
        }

        let excluded: HashSet<_> = exclude.iter().map(String::as_str).collect();
        configs.retain(|c| !excluded.contains(c.name.as_str()));

        for endpoint in extra {
            upsert(&mut configs, endpoint.clone());
        }

        Self::from_configs(&configs)
    }

    /// All endpoints in registry order
    pub fn list(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Look up an endpoint by name
    pub fn find(&self, name: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.name() == name)
    }

    /// First endpoint in registry order
    pub fn first(&self) -> &Endpoint {
        // non-empty by construction
        &self.endpoints[0]
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Endpoint names in registry order
    pub fn names(&self) -> Vec<&str> {
        self.endpoints.iter().map(|e| e.name()).collect()
    }
}

fn upsert(configs: &mut Vec<EndpointConfig>, endpoint: EndpointConfig) {
    match configs.iter_mut().find(|c| c.name == endpoint.name) {
        Some(existing) => *existing = endpoint,
        None => configs.push(endpoint),
    }
}
