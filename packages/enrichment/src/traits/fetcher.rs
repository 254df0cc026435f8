//! Page-content fetch seam.
//!
//! Abstracts over content-extraction providers that render a URL into plain
//! text. The fetch layer never retries; it only classifies failure so
//! callers can decide what a transport error versus an empty page means for
//! them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;
use tracing::debug;

use crate::error::FetchError;
use crate::types::config::SecretString;

const TAVILY_EXTRACT_URL: &str = "https://api.tavily.com/extract";

/// Content-extraction provider seam.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the rendered text content of `url`.
    ///
    /// Fails with [`FetchError::NoContent`] when the provider is reachable
    /// but nothing extractable came back — distinct from transport failure.
    async fn fetch_page_text(&self, url: &str) -> std::result::Result<String, FetchError>;
}

/// Tavily-backed fetcher using the extract endpoint.
#[derive(Clone)]
pub struct TavilyFetcher {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    extract_depth: String,
    timeout: Duration,
}

impl TavilyFetcher {
    /// Create a new Tavily fetcher.
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: TAVILY_EXTRACT_URL.to_string(),
            extract_depth: "basic".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set extraction depth ("basic" or "advanced").
    pub fn with_extract_depth(mut self, depth: impl Into<String>) -> Self {
        self.extract_depth = depth.into();
        self
    }

    /// Set a custom base URL (for test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-request timeout (default: 30s).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Serialize)]
struct ExtractRequest<'a> {
    urls: Vec<&'a str>,
    extract_depth: &'a str,
    include_images: bool,
}

#[derive(Deserialize)]
struct ExtractResponse {
    #[serde(default)]
    results: Vec<ExtractResult>,
}

#[derive(Deserialize)]
struct ExtractResult {
    raw_content: Option<String>,
    content: Option<String>,
}

impl ExtractResult {
    /// The richest available text field: raw unprocessed content wins over
    /// any post-processed variant.
    fn into_text(self) -> Option<String> {
        self.raw_content
            .filter(|text| !text.trim().is_empty())
            .or(self.content)
            .filter(|text| !text.trim().is_empty())
    }
}

#[async_trait]
impl PageFetcher for TavilyFetcher {
    async fn fetch_page_text(&self, url: &str) -> std::result::Result<String, FetchError> {
        let request = ExtractRequest {
            urls: vec![url],
            extract_depth: &self.extract_depth,
            include_images: false,
        };

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(Box::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Tavily API error: {}", status),
            ))));
        }

        let payload: ExtractResponse = response.json().await.map_err(|e| FetchError::Malformed {
            reason: e.to_string(),
        })?;

        let text = payload
            .results
            .into_iter()
            .next()
            .and_then(ExtractResult::into_text)
            .ok_or_else(|| FetchError::NoContent {
                url: url.to_string(),
            })?;

        debug!(url = %url, chars = text.chars().count(), "page text fetched");

        Ok(text)
    }
}

/// Mock fetcher for tests. Unknown URLs fail with [`FetchError::NoContent`].
#[derive(Default)]
pub struct MockFetcher {
    pages: RwLock<HashMap<String, String>>,
}

impl MockFetcher {
    /// Create a new mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add page text for a URL.
    pub fn with_page(self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(url.into(), text.into());
        self
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch_page_text(&self, url: &str) -> std::result::Result<String, FetchError> {
        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NoContent {
                url: url.to_string(),
            })
    }
}
