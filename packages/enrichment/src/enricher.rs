//! Composed production stack behind one entry point.

use gemini_client::GeminiClient;

use crate::ai::gemini::GeminiInference;
use crate::error::FetchError;
use crate::lookup::ProfileResolver;
use crate::mapping::HeaderMapper;
use crate::pipeline::extract::PeopleExtractor;
use crate::traits::fetcher::{PageFetcher, TavilyFetcher};
use crate::traits::searcher::SerpApiSearcher;
use crate::types::config::EnrichmentConfig;
use crate::types::records::{ExtractionOutcome, HeaderMapping, LookupResult};

/// Caller-facing surface wiring the production providers.
///
/// Every component stays independently constructible with injected
/// implementations; this facade is the batteries-included assembly from an
/// [`EnrichmentConfig`].
///
/// # Example
///
/// ```rust,ignore
/// use enrichment::{Enricher, EnrichmentConfig};
///
/// let enricher = Enricher::new(EnrichmentConfig::new(
///     gemini_key,
///     serpapi_key,
///     tavily_key,
/// ));
///
/// let mapping = enricher.suggest_mappings(&headers).await;
/// let lookup = enricher.find_linkedin_url("Jane Doe", "Acme").await;
/// let outcome = enricher.extract_people_from_url("https://conf.example/speakers").await;
/// ```
pub struct Enricher {
    mapper: HeaderMapper<GeminiInference>,
    resolver: ProfileResolver<SerpApiSearcher>,
    fetcher: TavilyFetcher,
    extractor: PeopleExtractor<TavilyFetcher, GeminiInference>,
}

impl Enricher {
    /// Assemble the production stack from `config`.
    pub fn new(config: EnrichmentConfig) -> Self {
        let client = GeminiClient::new(config.gemini_api_key.expose())
            .with_timeout(config.request_timeout);
        let inference = GeminiInference::new(client, config.gemini_model);

        let searcher = SerpApiSearcher::new(config.serpapi_api_key)
            .with_timeout(config.request_timeout);
        let fetcher = TavilyFetcher::new(config.tavily_api_key)
            .with_timeout(config.request_timeout);

        Self {
            mapper: HeaderMapper::new(inference.clone()),
            resolver: ProfileResolver::new(searcher).with_policy(config.retry),
            fetcher: fetcher.clone(),
            extractor: PeopleExtractor::new(fetcher, inference)
                .with_max_chars(config.max_inference_chars),
        }
    }

    /// Suggest which headers hold a person's name, company, and email.
    pub async fn suggest_mappings(&self, headers: &[String]) -> HeaderMapping {
        self.mapper.suggest_mappings(headers).await
    }

    /// Resolve a person's LinkedIn profile URL.
    pub async fn find_linkedin_url(&self, name: &str, company: &str) -> LookupResult {
        self.resolver.resolve(name, company).await
    }

    /// Fetch the rendered text content of a page.
    pub async fn fetch_page_text(&self, url: &str) -> Result<String, FetchError> {
        self.fetcher.fetch_page_text(url).await
    }

    /// Extract person records from the page at `url`.
    pub async fn extract_people_from_url(&self, url: &str) -> ExtractionOutcome {
        self.extractor.from_url(url).await
    }

    /// Extract person records from already-fetched page text.
    pub async fn extract_people_from_text(&self, text: &str) -> ExtractionOutcome {
        self.extractor.from_text(text).await
    }
}
