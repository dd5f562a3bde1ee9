//! Core types and traits for the search adapter

use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tokio::sync::mpsc;

/// A normalized search result delivered by any searcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Name of the engine that produced this result
    pub engine: String,
    /// Title of the page
    pub title: String,
    /// URL of the page
    pub link: String,
    /// Snippet/content shown by the engine
    pub content: String,
}

/// Debug options controlling which log lines a searcher emits
#[derive(Debug, Clone, Default)]
pub struct DebugOptions {
    /// Enable verbose logging
    pub enabled: bool,
    /// Log request details (URLs)
    pub log_requests: bool,
    /// Log response summaries
    pub log_responses: bool,
}

/// Where a search degraded to zero results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// The request never produced a usable response
    Transport,
    /// The response body could not be decoded
    Decode,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureStage::Transport => write!(f, "transport"),
            FailureStage::Decode => write!(f, "decode"),
        }
    }
}

/// A failure report emitted on a searcher's optional diagnostic channel
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub engine: String,
    pub stage: FailureStage,
    pub error: SearchError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} failure: {}", self.engine, self.stage, self.error)
    }
}

/// Sending half of a result channel
pub type ResultSender = mpsc::Sender<Vec<SearchResult>>;

/// Sending half of a diagnostic channel
pub type DiagnosticSender = mpsc::UnboundedSender<Diagnostic>;

/// Capability every search engine adapter provides.
///
/// An implementation must send exactly one batch on `results` per call, even
/// when the search fails; failures show up as an empty batch. That lets an
/// orchestrator fan several searchers into one receiver and simply count
/// messages.
#[async_trait::async_trait]
pub trait Searcher: Send + Sync + fmt::Debug {
    /// Name of the engine, as stamped on each result
    fn name(&self) -> &str;

    /// Run one search for `search_term` and deliver the results on `results`
    async fn search(&self, search_term: &str, results: ResultSender);

    /// Get searcher configuration (for debugging/logging)
    fn config(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

/// Options for [`crate::web_search`]
#[derive(Debug)]
pub struct SearchOptions {
    /// The search query text
    pub query: String,
    /// The searcher to run
    pub searcher: Box<dyn Searcher>,
}

impl SearchOptions {
    pub fn new(query: impl Into<String>, searcher: Box<dyn Searcher>) -> Self {
        Self {
            query: query.into(),
            searcher,
        }
    }
}

/// Provider configuration trait for consistent configuration patterns
pub trait ProviderConfig {
    /// Validate the configuration
    fn validate(&self) -> Result<(), SearchError>;

    /// Get the base URL for API requests
    fn base_url(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_serializes_all_fields() {
        let result = SearchResult {
            engine: "Google".to_string(),
            title: "The Go Programming Language".to_string(),
            link: "https://go.dev/".to_string(),
            content: "Go is an open source programming language.".to_string(),
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["engine"], "Google");
        assert_eq!(value["link"], "https://go.dev/");

        let back: SearchResult = serde_json::from_value(value).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic {
            engine: "Google".to_string(),
            stage: FailureStage::Decode,
            error: SearchError::ParseError("JSON parsing failed: EOF".to_string()),
        };

        assert_eq!(
            diagnostic.to_string(),
            "Google decode failure: Parsing error: JSON parsing failed: EOF"
        );
    }
}
