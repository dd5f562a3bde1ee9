//! # gsearch
//!
//! A Google search adapter for multi-engine search aggregators. A searcher
//! runs one query against its engine and delivers exactly one batch of
//! normalized results on a channel, whether the search succeeded or not.
//! Failures degrade to an empty batch, so an orchestrator can fan several
//! searchers into one receiver and wait for one message per searcher.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gsearch::{providers::GoogleProvider, Searcher};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let google = GoogleProvider::new()?;
//!
//!     let (tx, mut rx) = mpsc::channel(1);
//!     google.search("golang", tx).await;
//!
//!     for result in rx.recv().await.unwrap_or_default() {
//!         println!("[{}] {}: {}", result.engine, result.title, result.link);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod providers;
pub mod types;
pub mod utils;

// Re-export common types
pub use error::{SearchError, SearchResult as Result};
pub use types::{
    DebugOptions, Diagnostic, FailureStage, SearchOptions, SearchResult, Searcher,
};

use tokio::sync::mpsc;

/// Run one searcher and collect the single batch it delivers
///
/// # Arguments
///
/// * `options` - The query and the searcher to run it with
///
/// # Returns
///
/// The searcher's results, which are empty when the engine failed; or an
/// error when the query is blank or the searcher never delivered a batch
///
/// # Examples
///
/// ```rust,no_run
/// use gsearch::{providers::GoogleProvider, web_search, SearchOptions};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let google = GoogleProvider::new()?;
/// let results = web_search(SearchOptions::new("rust programming", Box::new(google))).await?;
/// # Ok(())
/// # }
/// ```
pub async fn web_search(options: SearchOptions) -> Result<Vec<SearchResult>> {
    if options.query.trim().is_empty() {
        return Err(SearchError::InvalidInput(
            "A search query is required".to_string(),
        ));
    }

    let (tx, mut rx) = mpsc::channel(1);
    options.searcher.search(&options.query, tx).await;

    rx.recv().await.ok_or_else(|| {
        SearchError::ProviderError(format!(
            "Searcher '{}' returned without delivering results",
            options.searcher.name()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResultSender;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct MockSearcher {
        name: String,
        results: Vec<SearchResult>,
        deliver: bool,
    }

    impl MockSearcher {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                results: vec![
                    SearchResult {
                        engine: name.to_string(),
                        title: "Test Result 1".to_string(),
                        link: "https://example.com/1".to_string(),
                        content: "Test content 1".to_string(),
                    },
                    SearchResult {
                        engine: name.to_string(),
                        title: "Test Result 2".to_string(),
                        link: "https://example.com/2".to_string(),
                        content: "Test content 2".to_string(),
                    },
                ],
                deliver: true,
            }
        }

        fn silent(mut self) -> Self {
            self.deliver = false;
            self
        }
    }

    #[async_trait]
    impl Searcher for MockSearcher {
        fn name(&self) -> &str {
            &self.name
        }

        async fn search(&self, _search_term: &str, results: ResultSender) {
            if self.deliver {
                let _ = results.send(self.results.clone()).await;
            }
        }
    }

    #[tokio::test]
    async fn test_web_search_success() {
        let options = SearchOptions::new("test query", Box::new(MockSearcher::new("test")));

        let results = web_search(options).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Test Result 1");
        assert_eq!(results[0].link, "https://example.com/1");
        assert_eq!(results[0].engine, "test");
    }

    #[tokio::test]
    async fn test_web_search_empty_query() {
        for query in ["", "   "] {
            let options = SearchOptions::new(query, Box::new(MockSearcher::new("test")));

            match web_search(options).await.unwrap_err() {
                SearchError::InvalidInput(msg) => assert!(msg.contains("search query")),
                other => panic!("Expected InvalidInput error, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_web_search_searcher_that_never_sends() {
        let options = SearchOptions::new("test", Box::new(MockSearcher::new("mute").silent()));

        match web_search(options).await.unwrap_err() {
            SearchError::ProviderError(msg) => assert!(msg.contains("'mute'")),
            other => panic!("Expected ProviderError, got {other:?}"),
        }
    }
}
