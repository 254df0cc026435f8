//! Construction-time configuration and credential handling.
//!
//! Every component receives its credentials and endpoints explicitly at
//! construction; deep call paths never read ambient environment. Secrets use
//! the `secrecy` crate so keys never appear in `Debug`/`Display` output.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;
use std::time::Duration;

use crate::pipeline::extract::MAX_INFERENCE_CHARS;
use crate::retry::RetryPolicy;

/// Default Gemini model for mapping and extraction inference.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// A secret string that won't be logged or displayed.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    /// Create a new secret string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret value for use.
    ///
    /// Only call this when actually using the secret (e.g., in an API
    /// request).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Configuration for the full enrichment stack.
#[derive(Clone)]
pub struct EnrichmentConfig {
    /// Gemini API key for schema-constrained inference
    pub gemini_api_key: SecretString,

    /// Gemini model identifier
    pub gemini_model: String,

    /// SerpAPI key for profile search
    pub serpapi_api_key: SecretString,

    /// Tavily key for page-content extraction
    pub tavily_api_key: SecretString,

    /// Retry policy for the profile lookup
    pub retry: RetryPolicy,

    /// Largest number of characters submitted to inference per extraction
    pub max_inference_chars: usize,

    /// Per-request timeout applied to every provider call
    pub request_timeout: Duration,
}

impl EnrichmentConfig {
    /// Create a config with default model, retry policy, and limits.
    pub fn new(
        gemini_api_key: impl Into<SecretString>,
        serpapi_api_key: impl Into<SecretString>,
        tavily_api_key: impl Into<SecretString>,
    ) -> Self {
        Self {
            gemini_api_key: gemini_api_key.into(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            serpapi_api_key: serpapi_api_key.into(),
            tavily_api_key: tavily_api_key.into(),
            retry: RetryPolicy::default(),
            max_inference_chars: MAX_INFERENCE_CHARS,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Set the Gemini model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.gemini_model = model.into();
        self
    }

    /// Set the lookup retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the inference input budget.
    pub fn with_max_inference_chars(mut self, max_chars: usize) -> Self {
        self.max_inference_chars = max_chars;
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl fmt::Debug for EnrichmentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnrichmentConfig")
            .field("gemini_api_key", &"[REDACTED]")
            .field("gemini_model", &self.gemini_model)
            .field("serpapi_api_key", &"[REDACTED]")
            .field("tavily_api_key", &"[REDACTED]")
            .field("retry", &self.retry)
            .field("max_inference_chars", &self.max_inference_chars)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
