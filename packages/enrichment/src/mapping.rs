//! Header-mapping call site over the inference seam.

use tracing::warn;

use crate::traits::inference::Inference;
use crate::types::records::{HeaderMapping, MappingResponse};

/// Suggests which headers hold a person's name, company, and email.
///
/// Inference failures never surface to the caller; the positional default
/// (first header for the name, second for the company) is applied instead.
pub struct HeaderMapper<I> {
    inference: I,
}

impl<I: Inference> HeaderMapper<I> {
    /// Create a mapper over an inference provider.
    pub fn new(inference: I) -> Self {
        Self { inference }
    }

    /// Suggest a mapping for `headers`.
    ///
    /// The returned `name_header` and `company_header` are always members
    /// of `headers`. With a single header both map to it; with no headers
    /// the mapping is empty (there is nothing to choose from).
    pub async fn suggest_mappings(&self, headers: &[String]) -> HeaderMapping {
        let response = match self.inference.suggest_mapping(headers).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "mapping inference failed, using positional defaults");
                MappingResponse::default()
            }
        };

        resolve_mapping(headers, response)
    }
}

/// Validate an inference reply against the caller's headers and fill
/// positional defaults for anything missing or out of vocabulary.
///
/// The company default is the first header distinct from the resolved name
/// header, so defaulting never assigns both to the same header unless only
/// one exists.
fn resolve_mapping(headers: &[String], response: MappingResponse) -> HeaderMapping {
    let member =
        |candidate: Option<String>| candidate.filter(|c| headers.iter().any(|h| h == c));

    let name_header = member(response.name_header)
        .or_else(|| headers.first().cloned())
        .unwrap_or_default();

    let company_header = member(response.company_header)
        .or_else(|| headers.iter().find(|h| **h != name_header).cloned())
        .or_else(|| headers.first().cloned())
        .unwrap_or_default();

    let email_header = member(response.email_header);

    HeaderMapping {
        name_header,
        company_header,
        email_header,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_valid_reply_is_kept() {
        let headers = headers(&["Email", "Full Name", "Employer"]);
        let response = MappingResponse {
            name_header: Some("Full Name".to_string()),
            company_header: Some("Employer".to_string()),
            email_header: Some("Email".to_string()),
        };

        let mapping = resolve_mapping(&headers, response);
        assert_eq!(mapping.name_header, "Full Name");
        assert_eq!(mapping.company_header, "Employer");
        assert_eq!(mapping.email_header, Some("Email".to_string()));
    }

    #[test]
    fn test_non_member_reply_falls_back_positionally() {
        let headers = headers(&["Full Name", "Employer"]);
        let response = MappingResponse {
            name_header: Some("Person".to_string()),
            company_header: Some("Organization".to_string()),
            email_header: Some("Mail".to_string()),
        };

        let mapping = resolve_mapping(&headers, response);
        assert_eq!(mapping.name_header, "Full Name");
        assert_eq!(mapping.company_header, "Employer");
        assert_eq!(mapping.email_header, None);
    }

    #[test]
    fn test_empty_reply_falls_back_positionally() {
        let headers = headers(&["A", "B", "C"]);
        let mapping = resolve_mapping(&headers, MappingResponse::default());
        assert_eq!(mapping.name_header, "A");
        assert_eq!(mapping.company_header, "B");
        assert_eq!(mapping.email_header, None);
    }

    #[test]
    fn test_single_header_maps_both() {
        let headers = headers(&["Contact"]);
        let mapping = resolve_mapping(&headers, MappingResponse::default());
        assert_eq!(mapping.name_header, "Contact");
        assert_eq!(mapping.company_header, "Contact");
    }

    #[test]
    fn test_no_headers_yields_empty_mapping() {
        let mapping = resolve_mapping(&[], MappingResponse::default());
        assert_eq!(mapping.name_header, "");
        assert_eq!(mapping.company_header, "");
        assert_eq!(mapping.email_header, None);
    }

    #[test]
    fn test_defaulted_company_skips_inferred_name() {
        // Name resolves to the third header; the company default must not
        // collide with it.
        let headers = headers(&["Speaker", "Topic", "Speaker Name"]);
        let response = MappingResponse {
            name_header: Some("Speaker Name".to_string()),
            company_header: None,
            email_header: None,
        };

        let mapping = resolve_mapping(&headers, response);
        assert_eq!(mapping.name_header, "Speaker Name");
        assert_eq!(mapping.company_header, "Speaker");
    }
}
