//! Profile search seam.
//!
//! Abstracts over search providers (SerpAPI, Google Custom Search, ...) so
//! the resilient lookup can be exercised against test doubles. The provider
//! returns an ordered result list; interpreting the links is the resolver's
//! job, not the searcher's.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::error::SearchError;
use crate::types::config::SecretString;

const SERPAPI_BASE_URL: &str = "https://serpapi.com/search.json";

/// A single result from the search provider, in provider order.
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// The result's link
    pub link: String,

    /// Title of the result, if available
    pub title: Option<String>,

    /// Snippet/description from the result, if available
    pub snippet: Option<String>,
}

impl SearchHit {
    /// Create a hit from a link.
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            title: None,
            snippet: None,
        }
    }

    /// Add a title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a snippet.
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }
}

/// Search provider seam for profile resolution.
#[async_trait]
pub trait ProfileSearcher: Send + Sync {
    /// Run `query` against the provider and return its results in order.
    ///
    /// `nonce` is fresh per attempt; implementations must forward it so no
    /// intermediate caching layer can collapse retries into one cached
    /// response.
    async fn search(&self, query: &str, nonce: Uuid)
        -> std::result::Result<Vec<SearchHit>, SearchError>;
}

/// SerpAPI-backed searcher using the Google engine.
#[derive(Clone)]
pub struct SerpApiSearcher {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    timeout: Duration,
}

impl SerpApiSearcher {
    /// Create a new SerpAPI searcher.
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: SERPAPI_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set a custom base URL (for relays or test servers).
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

#[async_trait]
impl ProfileSearcher for SerpApiSearcher {
    async fn search(
        &self,
        query: &str,
        nonce: Uuid,
    ) -> std::result::Result<Vec<SearchHit>, SearchError> {
        #[derive(Deserialize)]
        struct Response {
            #[serde(default)]
            organic_results: Vec<OrganicResult>,
            error: Option<String>,
        }

        #[derive(Deserialize)]
        struct OrganicResult {
            link: Option<String>,
            title: Option<String>,
            snippet: Option<String>,
        }

        let nonce = nonce.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("api_key", self.api_key.expose()),
                ("no_cache", "true"),
                ("nonce", nonce.as_str()),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SearchError::Http(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Http(Box::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("SerpAPI error: {}", status),
            ))));
        }

        let payload: Response = response
            .json()
            .await
            .map_err(|e| SearchError::Http(Box::new(e)))?;

        if let Some(error) = payload.error {
            return Err(SearchError::Api(error));
        }

        let hits: Vec<SearchHit> = payload
            .organic_results
            .into_iter()
            .filter_map(|r| {
                let mut hit = SearchHit::new(r.link?);
                if let Some(title) = r.title {
                    hit = hit.with_title(title);
                }
                if let Some(snippet) = r.snippet {
                    hit = hit.with_snippet(snippet);
                }
                Some(hit)
            })
            .collect();

        debug!(query = %query, hits = hits.len(), "SerpAPI search completed");

        Ok(hits)
    }
}

/// Record of a call made to [`MockSearcher`].
#[derive(Debug, Clone)]
pub struct MockSearchCall {
    pub query: String,
    pub nonce: Uuid,
}

/// Mock searcher for tests.
///
/// Scripts one outcome per attempt, in order; attempts beyond the script
/// get an empty (well-formed, matchless) result list.
#[derive(Default)]
pub struct MockSearcher {
    script: Mutex<VecDeque<std::result::Result<Vec<SearchHit>, String>>>,
    calls: Mutex<Vec<MockSearchCall>>,
}

impl MockSearcher {
    /// Create a new mock searcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful response for the next attempt.
    pub fn with_hits(self, hits: Vec<SearchHit>) -> Self {
        self.script.lock().unwrap().push_back(Ok(hits));
        self
    }

    /// Script a successful response from link strings.
    pub fn with_links(self, links: &[&str]) -> Self {
        let hits = links.iter().map(|link| SearchHit::new(*link)).collect();
        self.with_hits(hits)
    }

    /// Script a transport failure for the next attempt.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Err(message.into()));
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockSearchCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileSearcher for MockSearcher {
    async fn search(
        &self,
        query: &str,
        nonce: Uuid,
    ) -> std::result::Result<Vec<SearchHit>, SearchError> {
        self.calls.lock().unwrap().push(MockSearchCall {
            query: query.to_string(),
            nonce,
        });

        match self.script.lock().unwrap().pop_front() {
            Some(Ok(hits)) => Ok(hits),
            Some(Err(message)) => Err(SearchError::Api(message)),
            None => Ok(Vec::new()),
        }
    }
}
