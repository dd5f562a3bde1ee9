//! Error types for the search adapter

use thiserror::Error;

/// Result type alias for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors raised while configuring or running a search.
///
/// The adapter itself never hands these to the result channel; they surface
/// through constructors, [`crate::web_search`] and the diagnostic channel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// HTTP request failed (connect, DNS, or a non-success status)
    #[error("HTTP request failed: {message}")]
    HttpError {
        message: String,
        status_code: Option<u16>,
        response_body: Option<String>,
    },

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Provider broke its contract
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Response body could not be decoded
    #[error("Parsing error: {0}")]
    ParseError(String),

    /// Timeout error
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Generic error for unhandled cases
    #[error("Search error: {0}")]
    Other(String),
}

impl SearchError {
    /// Whether the failure happened while reading the response rather than reaching the provider
    pub fn is_decode(&self) -> bool {
        matches!(self, SearchError::ParseError(_))
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            SearchError::ParseError(format!("Response body could not be read: {error}"))
        } else {
            SearchError::HttpError {
                message: error.to_string(),
                status_code: error.status().map(|s| s.as_u16()),
                response_body: None,
            }
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(error: serde_json::Error) -> Self {
        SearchError::ParseError(format!("JSON parsing failed: {error}"))
    }
}

impl From<url::ParseError> for SearchError {
    fn from(error: url::ParseError) -> Self {
        SearchError::InvalidInput(format!("Invalid URL: {error}"))
    }
}
