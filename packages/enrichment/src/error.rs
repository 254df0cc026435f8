//! Typed errors for the enrichment library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Public operations convert
//! these into typed outcome values before they cross the crate boundary;
//! only the fetch and search seams surface them directly.

use thiserror::Error;

/// Errors that can occur during enrichment operations.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// Inference provider unavailable or returned an unusable reply
    #[error("inference error: {0}")]
    Inference(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Page fetch failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Profile search failed
    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Errors from the content-extraction provider.
///
/// None of these are retried at the fetch layer; retry policy, if any, is
/// the caller's responsibility.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Provider unreachable or non-2xx status
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Provider reachable but returned no extractable content
    #[error("no content extracted from {url}")]
    NoContent { url: String },

    /// Unexpected response shape
    #[error("malformed provider response: {reason}")]
    Malformed { reason: String },

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },
}

/// Errors from the profile-search provider.
///
/// Every variant is transient from the resolver's point of view and subject
/// to retry with backoff.
#[derive(Debug, Error)]
pub enum SearchError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The provider answered with an error payload
    #[error("search provider error: {0}")]
    Api(String),
}

/// Result type alias for enrichment operations.
pub type Result<T> = std::result::Result<T, EnrichmentError>;
