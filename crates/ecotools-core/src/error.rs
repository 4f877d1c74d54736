//! Error types shared by the calculators and the route advisor

use thiserror::Error;

/// Invalid or missing user input.
///
/// Always recoverable: the user corrects the input and tries again.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// Not a finite number greater than zero
    #[error("invalid distance")]
    InvalidDistance,
}

/// Errors that abort a route request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    /// Origin or destination is blank
    #[error("missing endpoint")]
    MissingEndpoint,

    /// Directions provider answered with a status other than `OK`
    #[error("{0}")]
    Status(String),

    /// `OK` status but no leg to read
    #[error("directions response contained no route")]
    EmptyRoute,

    /// Directions call exceeded the configured timeout
    #[error("directions request timed out")]
    Timeout,

    /// Transport failure
    #[error("directions request failed: {0}")]
    Provider(#[from] ProviderError),
}

/// Transport-level failures of a maps provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Request could not be completed
    #[error("HTTP error: {0}")]
    Http(String),

    /// Body did not match the expected shape
    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),

    /// No API key in config or environment
    #[error("No API key configured")]
    MissingApiKey,
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ProviderError::InvalidResponse(e.to_string())
        } else {
            ProviderError::Http(e.to_string())
        }
    }
}

/// Errors loading configuration or preference files
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid JSON for this type
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A widget timer period of zero
    #[error("{0}.interval_ms must be greater than zero")]
    ZeroInterval(&'static str),

    /// Neither a data directory nor a home directory exists
    #[error("Could not find app data directory")]
    NoDataDir,
}
