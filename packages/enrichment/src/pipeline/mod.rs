//! Fetch-then-extract pipeline.
//!
//! - [`extract`] - the two-stage pipeline turning page content into records
//! - [`prompts`] - prompt templates for the inference provider

pub mod extract;
pub mod prompts;
