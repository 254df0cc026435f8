//! Gemini implementation of the Inference trait.
//!
//! Wraps [`gemini_client::GeminiClient`] with the domain prompts and
//! response types. All provider errors (missing credential, network, API,
//! schema-validation) surface as [`EnrichmentError::Inference`]; call sites
//! convert them into their defaults.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::debug;

use gemini_client::GeminiClient;

use crate::error::{EnrichmentError, Result};
use crate::pipeline::prompts::{render_extract_prompt, render_mapping_prompt};
use crate::traits::inference::Inference;
use crate::types::records::{MappingResponse, PersonRecord};

/// Gemini-backed inference.
#[derive(Clone)]
pub struct GeminiInference {
    client: GeminiClient,
    model: String,
}

impl GeminiInference {
    /// Create an inference provider over `client` using `model`.
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Get the model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Schema wrapper for the extraction reply.
#[derive(Debug, Deserialize, JsonSchema)]
struct PeopleResponse {
    people: Vec<PersonRecord>,
}

#[async_trait]
impl Inference for GeminiInference {
    async fn suggest_mapping(&self, headers: &[String]) -> Result<MappingResponse> {
        let prompt = render_mapping_prompt(headers);
        debug!(headers = headers.len(), "requesting header mapping");

        self.client
            .extract::<MappingResponse>(&self.model, &prompt)
            .await
            .map_err(|e| EnrichmentError::Inference(Box::new(e)))
    }

    async fn extract_people(&self, page_text: &str) -> Result<Vec<PersonRecord>> {
        let prompt = render_extract_prompt(page_text);
        debug!(
            chars = page_text.chars().count(),
            "requesting people extraction"
        );

        let response = self
            .client
            .extract::<PeopleResponse>(&self.model, &prompt)
            .await
            .map_err(|e| EnrichmentError::Inference(Box::new(e)))?;

        Ok(response.people)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemini_client::StructuredOutput;

    #[test]
    fn test_people_response_schema_shape() {
        let schema = PeopleResponse::gemini_schema();
        let people = &schema["properties"]["people"];

        assert_eq!(people["type"], "array");
        assert_eq!(people["items"]["type"], "object");

        let required = people["items"]["required"].as_array().unwrap();
        let required_strs: Vec<&str> = required.iter().filter_map(|v| v.as_str()).collect();
        assert!(required_strs.contains(&"name"));
        assert!(required_strs.contains(&"company"));
        assert!(!required_strs.contains(&"role"));
    }

    #[test]
    fn test_mapping_response_schema_is_all_nullable() {
        let schema = MappingResponse::gemini_schema();
        let name_header = &schema["properties"]["name_header"];

        assert_eq!(name_header["type"], "string");
        assert_eq!(name_header["nullable"], true);
    }
}
