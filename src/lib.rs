//! flashblock-client - Resilient batch transaction submission for the Flashblock relay
//!
//! Probes the regional relay endpoints in parallel, picks the fastest healthy
//! one, submits a batch of pre-signed transactions with retry on 429/5xx, and
//! fails over to a freshly selected endpoint when the connection itself fails.
//!
//! # Example
//!
//! ```rust,no_run
//! use flashblock_client::{ClientConfig, EndpointRegistry, SubmissionCoordinator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = EndpointRegistry::with_defaults()?;
//!     let coordinator = SubmissionCoordinator::new(registry, ClientConfig::default())?;
//!
//!     let txs = vec!["AQAAAA...".to_string()];
//!     let outcome = coordinator.submit("my-auth-token", &txs, None).await?;
//!
//!     println!(
//!         "{} via {}: {:?}",
//!         outcome.http_status, outcome.endpoint_used, outcome.signatures
//!     );
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod relay;

// Re-exports for convenience
pub use config::{ClientConfig, ConfigFile, EndpointConfig, Settings};
pub use error::{ConfigError, Error, Result, SubmitError};
pub use relay::{
    default_endpoints, random_tip_address, rank, BatchReply, BatchResponse, ConnectionLimiter,
    Endpoint, EndpointRegistry, HealthProber, ProbeResult, SubmissionCoordinator, SubmissionOutcome,
    SubmissionRequest, TIP_ADDRESSES,
};
