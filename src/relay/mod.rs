//! Relay endpoints, health probing and batch submission

mod defaults;
mod limit;
mod probe;
mod registry;
mod response;
mod submit;

pub use defaults::{default_endpoints, random_tip_address, TIP_ADDRESSES};
pub use limit::ConnectionLimiter;
pub use probe::{rank, HealthProber, ProbeResult};
pub use registry::{Endpoint, EndpointRegistry, SUBMIT_PATH};
pub use response::BatchReply;
pub use submit::{
    build_http_client, is_transient, BatchResponse, SubmissionCoordinator, SubmissionOutcome,
    SubmissionRequest,
};
