//! Type-safe schema generation for Gemini structured outputs.
//!
//! Uses the `schemars` crate to automatically generate JSON schemas from Rust
//! types, then rewrites them into the subset Gemini's `responseSchema`
//! accepts.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use gemini_client::StructuredOutput;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Person {
//!     name: String,
//!     role: Option<String>,
//! }
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct ExtractionResponse {
//!     people: Vec<Person>,
//! }
//!
//! // Get a Gemini-compatible schema
//! let schema = ExtractionResponse::gemini_schema();
//! ```

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;

/// Trait for types that can be used as Gemini structured output.
///
/// Automatically implemented for any type that implements
/// `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate a Gemini-compatible JSON schema for this type.
    ///
    /// Gemini's `responseSchema` is an OpenAPI-style subset:
    /// 1. No `$ref` references — all definitions must be inlined
    /// 2. No `$schema`, `definitions`, or `additionalProperties` keywords
    /// 3. Optionality is expressed as `nullable: true`, not a
    ///    `["T", "null"]` type union
    ///
    /// This method transforms the schemars output to meet these requirements.
    fn gemini_schema() -> serde_json::Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        // Step 1: Inline all $ref references
        inline_refs(&mut value);

        // Step 2: Drop the wrapper keywords Gemini rejects
        if let serde_json::Value::Object(map) = &mut value {
            map.remove("definitions");
            map.remove("$schema");
        }

        // Step 3: Rewrite unsupported constructs throughout
        normalize_for_gemini(&mut value);

        value
    }

    /// Get the schema name for this type.
    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

// Blanket implementation for all types that satisfy the bounds
impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Inline all $ref references by replacing them with the actual schema from
/// definitions.
fn inline_refs(value: &mut serde_json::Value) {
    let definitions = if let serde_json::Value::Object(map) = value {
        map.get("definitions").cloned()
    } else {
        None
    };

    if let Some(defs) = definitions {
        inline_refs_recursive(value, &defs);
    }
}

fn inline_refs_recursive(value: &mut serde_json::Value, definitions: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if let Some(serde_json::Value::String(ref_path)) = map.get("$ref").cloned() {
                if let Some(type_name) = ref_path.strip_prefix("#/definitions/") {
                    if let Some(def) = definitions.get(type_name) {
                        *value = def.clone();
                        // The inlined definition may itself hold refs
                        inline_refs_recursive(value, definitions);
                        return;
                    }
                }
            }

            for (_, v) in map.iter_mut() {
                inline_refs_recursive(v, definitions);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_refs_recursive(item, definitions);
            }
        }
        _ => {}
    }
}

/// Rewrite schemars constructs into Gemini's OpenAPI-style subset.
///
/// Removes `additionalProperties` and converts `"type": ["T", "null"]`
/// unions (what schemars emits for `Option<T>`) into a single type with
/// `nullable: true`.
fn normalize_for_gemini(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            map.remove("additionalProperties");

            let retyped = match map.get("type") {
                Some(serde_json::Value::Array(types)) => {
                    let has_null = types.iter().any(|t| t == "null");
                    types
                        .iter()
                        .find(|t| *t != "null")
                        .cloned()
                        .map(|primary| (primary, has_null))
                }
                _ => None,
            };
            if let Some((primary, has_null)) = retyped {
                map.insert("type".to_string(), primary);
                if has_null {
                    map.insert("nullable".to_string(), serde_json::Value::Bool(true));
                }
            }

            for (_, v) in map.iter_mut() {
                normalize_for_gemini(v);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr.iter_mut() {
                normalize_for_gemini(item);
            }
        }
        _ => {}
    }
}
