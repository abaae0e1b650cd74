//! Error types for flashblock-client

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Submission errors
    #[error("Submit error: {0}")]
    Submit(#[from] SubmitError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Submission errors that abort a `submit` call.
///
/// Remote-side failures (429, 5xx, 4xx) are not errors; they come back as a
/// [`SubmissionOutcome`](crate::SubmissionOutcome) with `succeeded == false`.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Credential is empty or not a valid header value")]
    InvalidCredential,

    #[error("Transaction batch is empty")]
    EmptyBatch,

    #[error("Transport failure on endpoint {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    HttpClientInit(String),
}

impl SubmitError {
    /// True for errors raised before any network I/O
    pub fn is_precondition(&self) -> bool {
        matches!(self, SubmitError::InvalidCredential | SubmitError::EmptyBatch)
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config file: {0}")]
    InvalidFile(String),

    #[error("Config file parse error: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("No endpoints configured")]
    NoEndpoints,

    #[error("Duplicate endpoint name: {0}")]
    DuplicateEndpoint(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Missing credential: set AUTH_HEADER or pass --auth")]
    MissingCredential,

    #[error("Invalid transactions file: {0}")]
    InvalidTransactions(String),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),
}

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}
