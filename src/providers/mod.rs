//! Searcher implementations

pub mod google;

// Re-export searchers for convenience
pub use google::{GoogleConfig, GoogleProvider};
