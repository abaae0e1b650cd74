//! Batch submission with transient retry and endpoint failover

use crate::config::ClientConfig;
use crate::error::{Result, SubmitError};
use crate::relay::{BatchReply, ConnectionLimiter, Endpoint, EndpointRegistry, HealthProber};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// A batch to submit
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    /// Value sent verbatim in the `Authorization` header
    pub credential: String,
    /// Pre-signed, encoded transactions; never inspected
    pub transactions: Vec<String>,
    /// Endpoint name that bypasses probing when it exists
    pub preferred_endpoint: Option<String>,
}

impl SubmissionRequest {
    pub fn new(credential: impl Into<String>, transactions: Vec<String>) -> Self {
        Self {
            credential: credential.into(),
            transactions,
            preferred_endpoint: None,
        }
    }

    /// Builder-style setter for preferred_endpoint
    pub fn with_preferred_endpoint(mut self, name: impl Into<String>) -> Self {
        self.preferred_endpoint = Some(name.into());
        self
    }
}

/// Result of a completed submission, successful or not
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub succeeded: bool,
    pub response_code: i64,
    pub message: String,
    pub signatures: Vec<String>,
    pub http_status: u16,
    /// Wall time from the start of `submit`, including probing and failover
    pub duration_ms: u64,
    /// Endpoint that produced this response
    pub endpoint_used: Endpoint,
    /// HTTP attempts made against `endpoint_used`
    pub attempts: u32,
    /// True when the first endpoint hit a transport failure
    pub failed_over: bool,
    /// Response body as received (`null` when absent or not JSON)
    pub raw: Value,
}

/// Final response of one `submit_batch` call
#[derive(Debug, Clone)]
pub struct BatchResponse {
    pub status: StatusCode,
    pub body: Value,
    pub attempts: u32,
}

/// Resolves an endpoint, submits, retries transient errors, fails over once
#[derive(Debug, Clone)]
pub struct SubmissionCoordinator {
    client: reqwest::Client,
    registry: Arc<EndpointRegistry>,
    prober: HealthProber,
    limiter: ConnectionLimiter,
    config: ClientConfig,
}

impl SubmissionCoordinator {
    /// Create a coordinator with its own pooled HTTP client
    pub fn new(registry: EndpointRegistry, config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = build_http_client(&config)?;
        Ok(Self::with_client(client, registry, config))
    }

    /// Create a coordinator around an existing HTTP client
    pub fn with_client(
        client: reqwest::Client,
        registry: EndpointRegistry,
        config: ClientConfig,
    ) -> Self {
        let registry = Arc::new(registry);
        let limiter = ConnectionLimiter::new(config.max_connections_per_host);
        let prober = HealthProber::new(
            client.clone(),
            registry.clone(),
            limiter.clone(),
            config.probe_timeout,
        );
        Self {
            client,
            registry,
            prober,
            limiter,
            config,
        }
    }

    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    pub fn prober(&self) -> &HealthProber {
        &self.prober
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Per-endpoint connection cap shared with the prober
    pub fn limiter(&self) -> &ConnectionLimiter {
        &self.limiter
    }

    /// Submit a request built with [`SubmissionRequest`]
    pub async fn submit_request(&self, request: &SubmissionRequest) -> Result<SubmissionOutcome> {
        self.submit(
            &request.credential,
            &request.transactions,
            request.preferred_endpoint.as_deref(),
        )
        .await
    }

    /// Submit a batch.
    ///
    /// Fails only on an unusable credential, an empty batch, or a transport
    /// failure on both the first endpoint and the re-selected one. Every
    /// HTTP response, including 4xx/5xx, comes back as an outcome.
    pub async fn submit(
        &self,
        credential: &str,
        transactions: &[String],
        preferred: Option<&str>,
    ) -> Result<SubmissionOutcome> {
        let start = Instant::now();
        check_preconditions(credential, transactions)?;

        let mut endpoint = self.resolve_endpoint(preferred).await;
        let mut failed_over = false;

        let response = match self.submit_batch(&endpoint, credential, transactions).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("{}; re-selecting endpoint", e);
                failed_over = true;
                endpoint = self.prober.select_best().await;
                self.submit_batch(&endpoint, credential, transactions)
                    .await?
            }
        };

        let reply = BatchReply::from_body(&response.body);
        Ok(SubmissionOutcome {
            succeeded: reply.success,
            response_code: reply.code,
            message: reply.message,
            signatures: reply.signatures,
            http_status: response.status.as_u16(),
            duration_ms: start.elapsed().as_millis() as u64,
            endpoint_used: endpoint,
            attempts: response.attempts,
            failed_over,
            raw: response.body,
        })
    }

    /// Preferred endpoint when it exists, otherwise the probe winner
    pub async fn resolve_endpoint(&self, preferred: Option<&str>) -> Endpoint {
        if let Some(name) = preferred {
            if let Some(endpoint) = self.registry.find(name) {
                tracing::debug!("Using preferred endpoint {}", endpoint);
                return endpoint.clone();
            }
            tracing::warn!("Unknown endpoint '{}', selecting by latency", name);
        }
        self.prober.select_best().await
    }

    /// POST the batch to one endpoint.
    ///
    /// 429 and 5xx are retried immediately up to `max_retries` times; the last
    /// response is returned once retries run out. Transport errors, including
    /// a body that cannot be read in time, are not retried here.
    pub async fn submit_batch(
        &self,
        endpoint: &Endpoint,
        credential: &str,
        transactions: &[String],
    ) -> std::result::Result<BatchResponse, SubmitError> {
        let url = endpoint.submit_url();
        let payload = serde_json::json!({ "transactions": transactions });
        let max_attempts = self.config.max_attempts();
        let mut attempts = 0u32;

        let transport = |source: reqwest::Error| SubmitError::Transport {
            endpoint: endpoint.name().to_string(),
            source,
        };

        loop {
            attempts += 1;
            let permit = self.limiter.acquire(endpoint).await;
            let resp = self
                .client
                .post(&url)
                .header(AUTHORIZATION, credential)
                .json(&payload)
                .timeout(self.config.submit_timeout)
                .send()
                .await
                .map_err(transport)?;

            let status = resp.status();
            let bytes = resp.bytes().await.map_err(transport)?;
            drop(permit);
            let body = serde_json::from_slice::<Value>(&bytes).unwrap_or(Value::Null);
            tracing::debug!(
                "Submit to {} attempt {}/{} -> {}",
                endpoint.name(),
                attempts,
                max_attempts,
                status.as_u16()
            );

            if is_transient(status) && attempts < max_attempts {
                tracing::warn!(
                    "Transient status {} from {}, retrying",
                    status.as_u16(),
                    endpoint.name()
                );
                continue;
            }

            return Ok(BatchResponse {
                status,
                body,
                attempts,
            });
        }
    }
}

/// 429 or any 5xx
pub fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn check_preconditions(credential: &str, transactions: &[String]) -> Result<()> {
    if credential.trim().is_empty() || HeaderValue::from_str(credential).is_err() {
        return Err(SubmitError::InvalidCredential.into());
    }
    if transactions.is_empty() {
        return Err(SubmitError::EmptyBatch.into());
    }
    Ok(())
}

/// Build the shared keep-alive client used for probes and submissions
pub fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .pool_idle_timeout(config.pool_idle_timeout)
        .tcp_keepalive(config.tcp_keepalive)
        .connect_timeout(config.connect_timeout)
        .build()
        .map_err(|e| SubmitError::HttpClientInit(e.to_string()).into())
}
