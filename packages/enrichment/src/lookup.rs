//! Resilient profile lookup with retry and backoff.
//!
//! State machine: attempt 1..=max_attempts run strictly sequentially. A
//! transport failure waits out the attempt's backoff and retries; a
//! well-formed response terminates immediately — either `Found` on the first
//! profile link or `NotFound` when no result matches. A matchless response
//! is a valid negative result, never retried. The final attempt's transport
//! failure yields `Failed` with that error's message.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::retry::RetryPolicy;
use crate::traits::searcher::{ProfileSearcher, SearchHit};
use crate::types::records::LookupResult;

/// Substrings identifying a LinkedIn profile link.
const PROFILE_MARKERS: [&str; 2] = ["linkedin.com/in/", "linkedin.com/pub/"];

/// Resolves a person's LinkedIn profile URL through a search provider.
pub struct ProfileResolver<S> {
    searcher: S,
    policy: RetryPolicy,
}

impl<S: ProfileSearcher> ProfileResolver<S> {
    /// Create a resolver with the default retry policy.
    pub fn new(searcher: S) -> Self {
        Self {
            searcher,
            policy: RetryPolicy::default(),
        }
    }

    /// Set the retry policy.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Access the underlying searcher (e.g. to inspect a test double).
    pub fn searcher(&self) -> &S {
        &self.searcher
    }

    /// Resolve a profile URL for `name` at `company`.
    ///
    /// Always resolves: bounded by the policy's attempt budget plus the sum
    /// of backoff delays.
    pub async fn resolve(&self, name: &str, company: &str) -> LookupResult {
        let query = build_profile_query(name, company);
        let mut last_error = String::new();

        for attempt in 1..=self.policy.max_attempts {
            // Fresh nonce per attempt so intermediate caches cannot collapse
            // retries into one cached response.
            let nonce = Uuid::new_v4();

            match self.searcher.search(&query, nonce).await {
                Ok(hits) => {
                    debug!(attempt, hits = hits.len(), "profile search answered");
                    return match first_profile_url(&hits) {
                        Some(url) => LookupResult::Found { url },
                        None => LookupResult::NotFound {
                            message: "No profile found".to_string(),
                        },
                    };
                }
                Err(e) => {
                    warn!(attempt, error = %e, "profile search attempt failed");
                    last_error = e.to_string();
                    if attempt < self.policy.max_attempts {
                        tokio::time::sleep(self.policy.delay_for(attempt)).await;
                    }
                }
            }
        }

        LookupResult::Failed {
            message: last_error,
        }
    }
}

/// Search query scoped to LinkedIn profile pages.
fn build_profile_query(name: &str, company: &str) -> String {
    format!(r#"site:linkedin.com/in "{}" {}"#, name, company)
}

/// First hit linking to a profile page, with the query string stripped.
/// Links the provider mangled beyond parsing are skipped.
fn first_profile_url(hits: &[SearchHit]) -> Option<String> {
    hits.iter().find_map(|hit| {
        if !PROFILE_MARKERS.iter().any(|m| hit.link.contains(m)) {
            return None;
        }
        let stripped = strip_query(&hit.link);
        url::Url::parse(stripped).ok().map(|_| stripped.to_string())
    })
}

fn strip_query(link: &str) -> &str {
    link.split('?').next().unwrap_or(link)
}
