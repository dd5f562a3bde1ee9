//! Shared helpers for searchers

pub mod debug;
pub mod http;
