//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the enrichment
//! library without making real inference or network calls. Mocks for the
//! search and fetch seams live next to their traits
//! ([`crate::traits::searcher::MockSearcher`],
//! [`crate::traits::fetcher::MockFetcher`]).

use async_trait::async_trait;
use std::sync::Mutex;

use crate::error::{EnrichmentError, Result};
use crate::traits::inference::Inference;
use crate::types::records::{MappingResponse, PersonRecord};

/// Record of a call made to [`MockInference`].
#[derive(Debug, Clone)]
pub enum MockInferenceCall {
    SuggestMapping { headers: Vec<String> },
    ExtractPeople { text_chars: usize },
}

/// A mock inference implementation for testing.
///
/// Returns deterministic, configurable responses. When scripted to fail,
/// every call surfaces an inference error so callers exercise their
/// defaulting paths.
#[derive(Default)]
pub struct MockInference {
    mapping: Mutex<Option<MappingResponse>>,
    people: Mutex<Vec<PersonRecord>>,
    fail_with: Mutex<Option<String>>,
    calls: Mutex<Vec<MockInferenceCall>>,
}

impl MockInference {
    /// Create a mock returning empty defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canned mapping reply.
    pub fn with_mapping(self, response: MappingResponse) -> Self {
        *self.mapping.lock().unwrap() = Some(response);
        self
    }

    /// Set the canned extraction reply.
    pub fn with_people(self, people: Vec<PersonRecord>) -> Self {
        *self.people.lock().unwrap() = people;
        self
    }

    /// Make every call fail with `message`.
    pub fn failing(self, message: impl Into<String>) -> Self {
        *self.fail_with.lock().unwrap() = Some(message.into());
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockInferenceCall> {
        self.calls.lock().unwrap().clone()
    }

    fn failure(&self) -> Option<EnrichmentError> {
        self.fail_with
            .lock()
            .unwrap()
            .clone()
            .map(|message| EnrichmentError::Inference(message.into()))
    }
}

#[async_trait]
impl Inference for MockInference {
    async fn suggest_mapping(&self, headers: &[String]) -> Result<MappingResponse> {
        self.calls
            .lock()
            .unwrap()
            .push(MockInferenceCall::SuggestMapping {
                headers: headers.to_vec(),
            });

        if let Some(error) = self.failure() {
            return Err(error);
        }

        Ok(self.mapping.lock().unwrap().clone().unwrap_or_default())
    }

    async fn extract_people(&self, page_text: &str) -> Result<Vec<PersonRecord>> {
        self.calls
            .lock()
            .unwrap()
            .push(MockInferenceCall::ExtractPeople {
                text_chars: page_text.chars().count(),
            });

        if let Some(error) = self.failure() {
            return Err(error);
        }

        Ok(self.people.lock().unwrap().clone())
    }
}
