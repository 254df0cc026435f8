//! Two-stage pipeline: fetch page text, then extract person records.

use tracing::{debug, warn};

use gemini_client::truncate_chars;

use crate::traits::fetcher::PageFetcher;
use crate::traits::inference::Inference;
use crate::types::records::ExtractionOutcome;

/// Largest number of characters submitted to inference per extraction.
///
/// Keeps the request inside the inference endpoint's input limits; trailing
/// content beyond the budget is dropped.
pub const MAX_INFERENCE_CHARS: usize = 200_000;

/// Extracts person records from event pages.
///
/// Composes a [`PageFetcher`] and an [`Inference`] provider. Every failure
/// degrades to a failed outcome with an empty record list; callers must
/// treat an empty list as "nothing found", never as a crash signal.
pub struct PeopleExtractor<F, I> {
    fetcher: F,
    inference: I,
    max_chars: usize,
}

impl<F: PageFetcher, I: Inference> PeopleExtractor<F, I> {
    /// Create an extractor with the default input budget.
    pub fn new(fetcher: F, inference: I) -> Self {
        Self {
            fetcher,
            inference,
            max_chars: MAX_INFERENCE_CHARS,
        }
    }

    /// Set the inference input budget in characters.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Access the underlying inference provider (e.g. to inspect a test
    /// double).
    pub fn inference(&self) -> &I {
        &self.inference
    }

    /// Extract people from the page at `url`.
    ///
    /// A fetch failure is terminal: the outcome is failed and inference is
    /// never invoked.
    pub async fn from_url(&self, url: &str) -> ExtractionOutcome {
        let text = match self.fetcher.fetch_page_text(url).await {
            Ok(text) => text,
            Err(e) => {
                warn!(url = %url, error = %e, "page fetch failed");
                return ExtractionOutcome::failed(e.to_string());
            }
        };

        self.from_text(&text).await
    }

    /// Extract people from already-fetched page text.
    pub async fn from_text(&self, text: &str) -> ExtractionOutcome {
        let input = truncate_chars(text, self.max_chars);

        match self.inference.extract_people(input).await {
            Ok(people) => {
                // Placeholder names are a prompt-contract rule; only the
                // non-empty-name post-condition is enforced here.
                let records: Vec<_> = people
                    .into_iter()
                    .filter(|p| !p.name.trim().is_empty())
                    .collect();
                debug!(records = records.len(), "people extraction finished");
                ExtractionOutcome::found(records)
            }
            Err(e) => {
                warn!(error = %e, "people extraction failed");
                ExtractionOutcome::failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockInference, MockInferenceCall};
    use crate::traits::fetcher::MockFetcher;
    use crate::types::records::PersonRecord;

    #[tokio::test]
    async fn test_blank_names_are_filtered() {
        let inference = MockInference::new().with_people(vec![
            PersonRecord::new("Jane Doe", "Acme"),
            PersonRecord::new("  ", "Acme"),
            PersonRecord::new("", "Acme"),
        ]);
        let extractor = PeopleExtractor::new(MockFetcher::new(), inference);

        let outcome = extractor.from_text("some page").await;
        assert!(outcome.success);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].name, "Jane Doe");
    }

    #[tokio::test]
    async fn test_input_is_truncated_to_budget() {
        let inference = MockInference::new();
        let extractor =
            PeopleExtractor::new(MockFetcher::new(), inference).with_max_chars(100);

        let text = "x".repeat(250);
        extractor.from_text(&text).await;

        let calls = extractor.inference().calls();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            MockInferenceCall::ExtractPeople { text_chars } => assert_eq!(*text_chars, 100),
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_short_input_is_not_truncated() {
        let inference = MockInference::new();
        let extractor =
            PeopleExtractor::new(MockFetcher::new(), inference).with_max_chars(100);

        extractor.from_text("short page").await;

        let calls = extractor.inference().calls();
        match &calls[0] {
            MockInferenceCall::ExtractPeople { text_chars } => {
                assert_eq!(*text_chars, "short page".chars().count())
            }
            other => panic!("unexpected call: {:?}", other),
        }
    }
}
