//! Prospect Identity Enrichment Library
//!
//! Enriches a list of people/companies with structured identity data, sitting
//! between unreliable external providers and callers expecting typed,
//! validated results:
//!
//! - **Header mapping** — schema-constrained inference over free-form
//!   spreadsheet headers, with positional defaults when inference is
//!   unusable.
//! - **Profile lookup** — resolves a person's LinkedIn profile URL through a
//!   search provider, retrying transport failures with increasing backoff.
//! - **People extraction** — fetches rendered page text and extracts a
//!   bounded, schema-validated list of person records.
//!
//! # Design Philosophy
//!
//! Every public operation returns a typed outcome — [`HeaderMapping`],
//! [`LookupResult`], [`ExtractionOutcome`] — instead of raising past the
//! crate boundary. Callers always receive a best-effort answer; worst case
//! is an empty or default result carrying an explanatory message. Negative
//! results (no profile found, no people on the page) are first-class
//! outcomes, distinct from transport or credential failure.
//!
//! External collaborators sit behind traits so test doubles can be injected:
//! [`Inference`], [`ProfileSearcher`], [`PageFetcher`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use enrichment::{Enricher, EnrichmentConfig};
//!
//! let enricher = Enricher::new(EnrichmentConfig::new(
//!     gemini_key, serpapi_key, tavily_key,
//! ));
//!
//! // Which columns hold the name and company?
//! let mapping = enricher.suggest_mappings(&headers).await;
//!
//! // Resolve a profile URL (retries transient provider failures)
//! match enricher.find_linkedin_url("Jane Doe", "Acme").await {
//!     lookup if lookup.is_found() => println!("{}", lookup.url().unwrap()),
//!     lookup => println!("{}", lookup.message().unwrap()),
//! }
//!
//! // Scrape an event page for people
//! let outcome = enricher
//!     .extract_people_from_url("https://conf.example/speakers")
//!     .await;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Provider seams (Inference, ProfileSearcher, PageFetcher)
//! - [`types`] - Domain records and configuration
//! - [`mapping`] - Header-mapping call site with positional defaulting
//! - [`lookup`] - Resilient profile lookup with retry/backoff
//! - [`pipeline`] - Fetch-then-extract pipeline and prompts
//! - [`ai`] - Gemini-backed inference implementation
//! - [`testing`] - Mock implementations for testing

pub mod ai;
pub mod enricher;
pub mod error;
pub mod lookup;
pub mod mapping;
pub mod pipeline;
pub mod retry;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{EnrichmentError, FetchError, Result, SearchError};
pub use types::{
    config::{EnrichmentConfig, SecretString, DEFAULT_GEMINI_MODEL},
    records::{ExtractionOutcome, HeaderMapping, LookupResult, MappingResponse, PersonRecord},
};

// Re-export the provider seams and their implementations
pub use traits::{
    fetcher::{MockFetcher, PageFetcher, TavilyFetcher},
    inference::Inference,
    searcher::{MockSearchCall, MockSearcher, ProfileSearcher, SearchHit, SerpApiSearcher},
};

pub use ai::gemini::GeminiInference;

// Re-export the operations
pub use enricher::Enricher;
pub use lookup::ProfileResolver;
pub use mapping::HeaderMapper;
pub use pipeline::extract::{PeopleExtractor, MAX_INFERENCE_CHARS};
pub use retry::RetryPolicy;

// Re-export testing utilities
pub use testing::{MockInference, MockInferenceCall};
