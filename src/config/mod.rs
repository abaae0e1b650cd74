//! Configuration: endpoints, client tuning and the TOML config file

mod client;
mod endpoint;
mod file;

pub use client::{
    ClientConfig, DEFAULT_MAX_RETRIES, DEFAULT_POOL_MAX_IDLE_PER_HOST, DEFAULT_PROBE_TIMEOUT,
    DEFAULT_SUBMIT_TIMEOUT,
};
pub use endpoint::EndpointConfig;
pub use file::{ConfigFile, DisabledEndpoints, Settings};
