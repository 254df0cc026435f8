//! Records produced by the enrichment operations.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Column mapping inferred from a file's header row.
///
/// `name_header` and `company_header` are always members of the
/// caller-supplied header list (or the positional fallback when inference
/// was unusable). Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMapping {
    /// Header holding the person's full name
    pub name_header: String,

    /// Header holding the company name or domain
    pub company_header: String,

    /// Header holding an email address, when one was identified
    pub email_header: Option<String>,
}

/// Raw mapping reply from the inference provider, before membership
/// validation and positional defaulting.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct MappingResponse {
    pub name_header: Option<String>,
    pub company_header: Option<String>,
    pub email_header: Option<String>,
}

/// A single person extracted from event-page text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PersonRecord {
    /// Full name. Non-empty for every record the pipeline returns.
    pub name: String,

    /// Company or organization ("Unknown" when the page gives none)
    pub company: String,

    /// Job title, when stated or inferable from context
    pub role: Option<String>,
}

impl PersonRecord {
    /// Create a record with no role.
    pub fn new(name: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            company: company.into(),
            role: None,
        }
    }

    /// Set the role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Outcome of a profile lookup.
///
/// `NotFound` is a valid negative result — the provider answered and no
/// profile link was present — and is distinct from `Failed`, which means
/// every attempt hit a transport failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupResult {
    /// A profile URL was resolved. Query parameters are stripped.
    Found { url: String },

    /// The provider answered but no result linked to a profile page.
    NotFound { message: String },

    /// Every attempt failed; carries the last attempt's error message.
    Failed { message: String },
}

impl LookupResult {
    /// Whether a profile URL was resolved.
    pub fn is_found(&self) -> bool {
        matches!(self, LookupResult::Found { .. })
    }

    /// The resolved URL, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            LookupResult::Found { url } => Some(url),
            _ => None,
        }
    }

    /// The negative-result or failure message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            LookupResult::Found { .. } => None,
            LookupResult::NotFound { message } | LookupResult::Failed { message } => Some(message),
        }
    }
}

/// Outcome of an extraction run.
///
/// `success == false` implies `records` is empty. `success == true` with
/// zero records means "no people found", which is a valid outcome and not a
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionOutcome {
    pub success: bool,
    pub records: Vec<PersonRecord>,
    pub message: Option<String>,
}

impl ExtractionOutcome {
    /// Successful run, possibly with zero records.
    pub fn found(records: Vec<PersonRecord>) -> Self {
        Self {
            success: true,
            records,
            message: None,
        }
    }

    /// Failed run. Records are always empty.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            records: Vec::new(),
            message: Some(message.into()),
        }
    }
}
