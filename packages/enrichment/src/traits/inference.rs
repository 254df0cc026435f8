//! Inference seam for LLM-backed operations.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::records::{MappingResponse, PersonRecord};

/// LLM operations the enrichment library needs.
///
/// Implementations wrap a specific provider (Gemini, OpenAI, ...) and own
/// prompting and response parsing. They surface failure instead of guessing:
/// callers layer their own defaulting on top, so a missing credential, a
/// network error, and a reply that failed schema validation all look the
/// same from here — an error the call site converts into its default.
#[async_trait]
pub trait Inference: Send + Sync {
    /// Identify which headers hold the person's name, company, and email.
    ///
    /// The reply is raw — not validated for membership in `headers`.
    async fn suggest_mapping(&self, headers: &[String]) -> Result<MappingResponse>;

    /// Extract person records from page text.
    ///
    /// The text is already truncated to the inference budget by the caller.
    async fn extract_people(&self, page_text: &str) -> Result<Vec<PersonRecord>>;
}
