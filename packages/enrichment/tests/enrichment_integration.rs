//! Integration tests for the enrichment operations.
//!
//! These tests exercise the public surface against the mock providers:
//! 1. Header mapping membership and positional defaults
//! 2. Profile lookup retry, backoff, and terminal outcomes
//! 3. The fetch-then-extract pipeline and its degradation paths

use std::collections::HashSet;
use std::time::{Duration, Instant};

use enrichment::{
    HeaderMapper, LookupResult, MappingResponse, MockFetcher, MockInference, MockSearcher,
    PeopleExtractor, PersonRecord, ProfileResolver, RetryPolicy, SearchHit,
};

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Policy with negligible delays so failing sequences don't slow the suite.
fn fast_policy() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(1))
}

// ============================================================================
// Header mapping
// ============================================================================

#[tokio::test]
async fn mapping_members_of_input_for_two_or_more_headers() {
    let header_list = headers(&["Email", "Full Name", "Employer", "Notes"]);
    let inference = MockInference::new().with_mapping(MappingResponse {
        name_header: Some("Full Name".to_string()),
        company_header: Some("Employer".to_string()),
        email_header: Some("Email".to_string()),
    });

    let mapping = HeaderMapper::new(inference).suggest_mappings(&header_list).await;

    assert!(header_list.contains(&mapping.name_header));
    assert!(header_list.contains(&mapping.company_header));
    assert_eq!(mapping.email_header, Some("Email".to_string()));
}

#[tokio::test]
async fn mapping_single_header_maps_company_to_name() {
    let header_list = headers(&["Contact"]);
    let mapping = HeaderMapper::new(MockInference::new())
        .suggest_mappings(&header_list)
        .await;

    assert_eq!(mapping.name_header, "Contact");
    assert_eq!(mapping.company_header, mapping.name_header);
}

#[tokio::test]
async fn mapping_inference_failure_falls_back_positionally() {
    let header_list = headers(&["First", "Second", "Third"]);
    let inference = MockInference::new().failing("credential missing");

    let mapping = HeaderMapper::new(inference).suggest_mappings(&header_list).await;

    assert_eq!(mapping.name_header, "First");
    assert_eq!(mapping.company_header, "Second");
    assert_eq!(mapping.email_header, None);
}

#[tokio::test]
async fn mapping_out_of_vocabulary_reply_falls_back_positionally() {
    let header_list = headers(&["Who", "Where"]);
    let inference = MockInference::new().with_mapping(MappingResponse {
        name_header: Some("Name".to_string()),
        company_header: Some("Company".to_string()),
        email_header: None,
    });

    let mapping = HeaderMapper::new(inference).suggest_mappings(&header_list).await;

    assert_eq!(mapping.name_header, "Who");
    assert_eq!(mapping.company_header, "Where");
}

#[tokio::test]
async fn mapping_is_idempotent_with_deterministic_stub() {
    let header_list = headers(&["Email", "Full Name", "Employer"]);
    let response = MappingResponse {
        name_header: Some("Full Name".to_string()),
        company_header: Some("Employer".to_string()),
        email_header: Some("Email".to_string()),
    };

    let first = HeaderMapper::new(MockInference::new().with_mapping(response.clone()))
        .suggest_mappings(&header_list)
        .await;
    let second = HeaderMapper::new(MockInference::new().with_mapping(response))
        .suggest_mappings(&header_list)
        .await;

    assert_eq!(first, second);
}

// ============================================================================
// Profile lookup
// ============================================================================

#[tokio::test]
async fn lookup_strips_query_string_from_profile_link() {
    let searcher = MockSearcher::new().with_hits(vec![
        SearchHit::new("https://acme.com/team"),
        SearchHit::new("https://www.linkedin.com/in/jane-doe?trk=abc"),
    ]);
    let resolver = ProfileResolver::new(searcher).with_policy(fast_policy());

    let result = resolver.resolve("Jane Doe", "Acme").await;

    assert_eq!(
        result,
        LookupResult::Found {
            url: "https://www.linkedin.com/in/jane-doe".to_string()
        }
    );
}

#[tokio::test]
async fn lookup_not_found_on_first_attempt_is_not_retried() {
    // Well-formed response, no profile link
    let searcher = MockSearcher::new().with_links(&["https://acme.com/about"]);
    let resolver = ProfileResolver::new(searcher).with_policy(fast_policy());

    let result = resolver.resolve("Jane Doe", "Acme").await;

    assert_eq!(
        result,
        LookupResult::NotFound {
            message: "No profile found".to_string()
        }
    );
    assert_eq!(resolver_calls(&resolver), 1);
}

#[tokio::test]
async fn lookup_exhausts_attempts_and_reports_last_error() {
    let searcher = MockSearcher::new()
        .with_failure("proxy error: 502")
        .with_failure("proxy error: 503")
        .with_failure("connection reset");
    let resolver = ProfileResolver::new(searcher).with_policy(fast_policy());

    let result = resolver.resolve("Jane Doe", "Acme").await;

    match result {
        LookupResult::Failed { message } => assert!(message.contains("connection reset")),
        other => panic!("expected Failed, got {:?}", other),
    }
    assert_eq!(resolver_calls(&resolver), 3);
}

#[tokio::test]
async fn lookup_backoff_lower_bound_on_full_failure() {
    let base = Duration::from_millis(20);
    let searcher = MockSearcher::new()
        .with_failure("down")
        .with_failure("down")
        .with_failure("down");
    let resolver = ProfileResolver::new(searcher).with_policy(RetryPolicy::new(3, base));

    let start = Instant::now();
    let result = resolver.resolve("Jane Doe", "Acme").await;
    let elapsed = start.elapsed();

    assert!(matches!(result, LookupResult::Failed { .. }));
    // Backoff of base*1 after attempt 1 and base*2 after attempt 2
    assert!(elapsed >= base * 3, "elapsed {:?} below backoff sum", elapsed);
}

#[tokio::test]
async fn lookup_recovers_on_retry_after_transient_failure() {
    let searcher = MockSearcher::new()
        .with_failure("proxy error: 502")
        .with_links(&["https://www.linkedin.com/in/jane-doe"]);
    let resolver = ProfileResolver::new(searcher).with_policy(fast_policy());

    let result = resolver.resolve("Jane Doe", "Acme").await;

    assert!(result.is_found());
    assert_eq!(resolver_calls(&resolver), 2);
}

#[tokio::test]
async fn lookup_attempts_carry_distinct_nonces() {
    let searcher = MockSearcher::new()
        .with_failure("down")
        .with_failure("down")
        .with_links(&["https://www.linkedin.com/in/jane-doe"]);
    let resolver = ProfileResolver::new(searcher).with_policy(fast_policy());

    resolver.resolve("Jane Doe", "Acme").await;

    let calls = calls_of(&resolver);
    let nonces: HashSet<_> = calls.iter().map(|c| c.nonce).collect();
    assert_eq!(calls.len(), 3);
    assert_eq!(nonces.len(), 3, "each attempt must carry a fresh nonce");
    // Same query on every attempt
    assert!(calls.iter().all(|c| c.query == calls[0].query));
}

// Accessing the mock through the resolver would hide it; keep the searcher
// reachable by resolving through a reference instead.
fn resolver_calls(resolver: &ProfileResolver<MockSearcher>) -> usize {
    calls_of(resolver).len()
}

fn calls_of(resolver: &ProfileResolver<MockSearcher>) -> Vec<enrichment::MockSearchCall> {
    resolver.searcher().calls()
}

// ============================================================================
// Extraction pipeline
// ============================================================================

#[tokio::test]
async fn extraction_from_url_happy_path() {
    let fetcher = MockFetcher::new().with_page(
        "https://conf.example/speakers",
        "Speakers: Jane Doe, CTO at Acme. John Roe, Founder of Initech.",
    );
    let inference = MockInference::new().with_people(vec![
        PersonRecord::new("Jane Doe", "Acme").with_role("CTO"),
        PersonRecord::new("John Roe", "Initech").with_role("Founder"),
    ]);
    let extractor = PeopleExtractor::new(fetcher, inference);

    let outcome = extractor.from_url("https://conf.example/speakers").await;

    assert!(outcome.success);
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.records[0].name, "Jane Doe");
}

#[tokio::test]
async fn extraction_fetch_failure_skips_inference() {
    let inference = MockInference::new();
    let extractor = PeopleExtractor::new(MockFetcher::new(), inference);

    let outcome = extractor.from_url("https://conf.example/missing").await;

    assert!(!outcome.success);
    assert!(outcome.records.is_empty());
    assert!(outcome.message.is_some());
    assert!(
        extractor.inference().calls().is_empty(),
        "inference must not run after a fetch failure"
    );
}

#[tokio::test]
async fn extraction_truncates_to_budget_before_inference() {
    let inference = MockInference::new();
    let extractor = PeopleExtractor::new(MockFetcher::new(), inference).with_max_chars(200_000);

    let text = "a".repeat(200_000 + 1234);
    extractor.from_text(&text).await;

    let calls = extractor.inference().calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        enrichment::MockInferenceCall::ExtractPeople { text_chars } => {
            assert_eq!(*text_chars, 200_000)
        }
        other => panic!("unexpected call: {:?}", other),
    }
}

#[tokio::test]
async fn extraction_inference_failure_degrades_to_failed_outcome() {
    let inference = MockInference::new().failing("model offline");
    let extractor = PeopleExtractor::new(MockFetcher::new(), inference);

    let outcome = extractor.from_text("some page text").await;

    assert!(!outcome.success);
    assert!(outcome.records.is_empty());
    assert!(outcome.message.unwrap().contains("model offline"));
}

#[tokio::test]
async fn extraction_zero_records_is_success() {
    let extractor = PeopleExtractor::new(MockFetcher::new(), MockInference::new());

    let outcome = extractor.from_text("a page about nothing").await;

    assert!(outcome.success);
    assert!(outcome.records.is_empty());
    assert!(outcome.message.is_none());
}
