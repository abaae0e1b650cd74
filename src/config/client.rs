//! HTTP client tuning shared by probes and submissions

use crate::error::{ConfigError, Result};
use std::time::Duration;

/// Default liveness probe timeout
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(1500);
/// Default per-attempt submission timeout
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default number of retries on 429/5xx (three attempts in total)
pub const DEFAULT_MAX_RETRIES: u32 = 2;
/// Default cap on idle pooled connections per endpoint
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 64;
/// Default cap on in-flight connections per endpoint
pub const DEFAULT_MAX_CONNECTIONS_PER_HOST: usize = 64;

/// Timeouts, retry budget and connection pool settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Hard timeout for one `GET /` probe
    pub probe_timeout: Duration,
    /// Timeout for one submission attempt
    pub submit_timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Retries after a transient (429/5xx) response
    pub max_retries: u32,
    /// Max idle keep-alive connections kept per endpoint
    pub pool_max_idle_per_host: usize,
    /// Max concurrent requests in flight to one endpoint
    pub max_connections_per_host: usize,
    /// How long an idle pooled connection is kept
    pub pool_idle_timeout: Duration,
    /// TCP keep-alive interval
    pub tcp_keepalive: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
            connect_timeout: Duration::from_secs(5),
            max_retries: DEFAULT_MAX_RETRIES,
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            max_connections_per_host: DEFAULT_MAX_CONNECTIONS_PER_HOST,
            pool_idle_timeout: Duration::from_secs(30),
            tcp_keepalive: Duration::from_secs(15),
        }
    }
}

impl ClientConfig {
    /// Builder-style setter for probe_timeout
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Builder-style setter for submit_timeout
    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }

    /// Builder-style setter for max_retries
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Builder-style setter for pool_max_idle_per_host
    pub fn with_pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Builder-style setter for max_connections_per_host
    pub fn with_max_connections_per_host(mut self, max: usize) -> Self {
        self.max_connections_per_host = max;
        self
    }

    /// Total attempts `submit_batch` may make against one endpoint
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Reject zero timeouts and a zero connection cap
    pub fn validate(&self) -> Result<()> {
        let zero = [
            ("probe timeout", self.probe_timeout.is_zero()),
            ("submit timeout", self.submit_timeout.is_zero()),
            ("connect timeout", self.connect_timeout.is_zero()),
            ("max connections per host", self.max_connections_per_host == 0),
        ];
        if let Some((name, _)) = zero.iter().find(|(_, is_zero)| *is_zero) {
            return Err(
                ConfigError::InvalidSetting(format!("{} must be greater than zero", name)).into(),
            );
        }
        Ok(())
    }
}
