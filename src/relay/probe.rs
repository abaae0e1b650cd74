//! Endpoint liveness probing and best-endpoint selection

use crate::relay::{ConnectionLimiter, Endpoint, EndpointRegistry};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Outcome of probing one endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub endpoint: Endpoint,
    /// True iff the probe got a 2xx response before the timeout
    pub healthy: bool,
    /// Round-trip time, or time-to-failure for unhealthy probes
    pub latency_ms: u64,
    /// HTTP status when a response arrived
    pub status: Option<u16>,
}

/// Probes every registered endpoint concurrently and ranks them
#[derive(Debug, Clone)]
pub struct HealthProber {
    client: reqwest::Client,
    registry: Arc<EndpointRegistry>,
    limiter: ConnectionLimiter,
    timeout: Duration,
}

impl HealthProber {
    pub fn new(
        client: reqwest::Client,
        registry: Arc<EndpointRegistry>,
        limiter: ConnectionLimiter,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            registry,
            limiter,
            timeout,
        }
    }

    /// Probe timeout used by `probe_all` and `select_best`
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    /// `GET <base>/` with a hard timeout. Never fails; errors become an
    /// unhealthy result.
    ///
    /// Waiting for a connection slot counts against the timeout.
    pub async fn probe_one(&self, endpoint: &Endpoint, timeout: Duration) -> ProbeResult {
        let start = Instant::now();
        let response = tokio::time::timeout(timeout, async {
            let _permit = self.limiter.acquire(endpoint).await;
            self.client
                .get(endpoint.probe_url())
                .timeout(timeout)
                .send()
                .await
        })
        .await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match response {
            Ok(Ok(resp)) => {
                let status = resp.status();
                tracing::debug!(
                    "Probe {} -> {} in {}ms",
                    endpoint.name(),
                    status.as_u16(),
                    latency_ms
                );
                ProbeResult {
                    endpoint: endpoint.clone(),
                    healthy: status.is_success(),
                    latency_ms,
                    status: Some(status.as_u16()),
                }
            }
            Ok(Err(e)) => {
                tracing::debug!(
                    "Probe {} failed after {}ms: {}",
                    endpoint.name(),
                    latency_ms,
                    e
                );
                ProbeResult {
                    endpoint: endpoint.clone(),
                    healthy: false,
                    latency_ms,
                    status: None,
                }
            }
            Err(_) => {
                tracing::debug!("Probe {} timed out after {}ms", endpoint.name(), latency_ms);
                ProbeResult {
                    endpoint: endpoint.clone(),
                    healthy: false,
                    latency_ms,
                    status: None,
                }
            }
        }
    }

    /// Probe all endpoints in parallel, waiting for every probe.
    ///
    /// Results come back in registry order.
    pub async fn probe_all(&self) -> Vec<ProbeResult> {
        let probes = self
            .registry
            .list()
            .iter()
            .map(|endpoint| self.probe_one(endpoint, self.timeout));
        join_all(probes).await
    }

    /// Fastest healthy endpoint, or the fastest overall when none is healthy
    pub async fn select_best(&self) -> Endpoint {
        let results = self.probe_all().await;
        match rank(&results) {
            Some(best) => {
                tracing::info!(
                    "Selected endpoint {} ({}ms, healthy: {})",
                    best.endpoint,
                    best.latency_ms,
                    best.healthy
                );
                best.endpoint.clone()
            }
            None => self.registry.first().clone(),
        }
    }
}

/// Pick the winner of a probing round.
///
/// Healthy results always beat unhealthy ones regardless of latency. Among
/// candidates the lowest latency wins; ties go to the earliest result.
pub fn rank(results: &[ProbeResult]) -> Option<&ProbeResult> {
    let healthy = results
        .iter()
        .filter(|r| r.healthy)
        .min_by_key(|r| r.latency_ms);

    healthy.or_else(|| results.iter().min_by_key(|r| r.latency_ms))
}
