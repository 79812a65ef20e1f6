#![deny(missing_docs)]

//! # Operation Extraction
//!
//! Turns one operation node into an [`EndpointDescriptor`]: parameters, request
//! body, success/error responses and the derived authentication flag.
//! Schema work is delegated to the resolver and the example synthesizer.

mod body;
mod params;
mod responses;

use crate::oas::document::Document;
use crate::oas::examples::ExampleSynthesizer;
use crate::oas::models::{EndpointDescriptor, HttpMethod, Parameter};
use crate::oas::operations::body::extract_request_body;
use crate::oas::operations::params::collect_parameters;
use crate::oas::operations::responses::{extract_errors, extract_success};
use crate::oas::resolver::SchemaResolver;
use serde_json::Value;

/// Substrings that mark a parameter as carrying credentials.
const AUTH_PARAM_MARKERS: [&str; 3] = ["auth", "token", "key"];

/// Extracts endpoint descriptors from operations of one document.
pub struct OperationExtractor<'a> {
    resolver: SchemaResolver<'a>,
}

impl<'a> OperationExtractor<'a> {
    /// Creates an extractor (and its resolver cache) for `document`.
    pub fn new(document: Document<'a>) -> Self {
        Self {
            resolver: SchemaResolver::new(document),
        }
    }

    /// The document being read.
    pub fn document(&self) -> &Document<'a> {
        self.resolver.document()
    }

    /// Builds the descriptor of `method path`.
    ///
    /// `path_item` is the enclosing Path Item, used for shared parameters.
    /// Missing or malformed pieces degrade to empty values; this never fails.
    pub fn extract(
        &self,
        method: HttpMethod,
        path: &str,
        operation: &Value,
        path_item: &Value,
    ) -> EndpointDescriptor {
        let document = self.resolver.document();
        let synthesizer = ExampleSynthesizer::new(&self.resolver);

        let parameters = collect_parameters(path_item, operation, &self.resolver, &synthesizer);
        let request_body = extract_request_body(operation, &parameters, document, &synthesizer);

        let responses = operation.get("responses").and_then(Value::as_object);
        let success = extract_success(responses, document, &synthesizer);
        let errors = extract_errors(responses, document, &synthesizer);

        let requirements = effective_security(operation, document);
        let security_schemes = scheme_names(requirements);
        let requires_auth =
            requirements.is_some_and(|r| !r.is_empty()) || has_credential_parameter(&parameters);

        EndpointDescriptor {
            method,
            path: path.to_string(),
            operation_id: text(operation, "operationId"),
            summary: text(operation, "summary").or_else(|| text(path_item, "summary")),
            description: text(operation, "description")
                .or_else(|| text(path_item, "description")),
            tags: operation
                .get("tags")
                .and_then(Value::as_array)
                .map(|tags| {
                    tags.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            deprecated: operation
                .get("deprecated")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            requires_auth,
            security_schemes,
            parameters,
            request_body,
            success_status: success.status,
            success_description: success.description,
            success_example: success.example,
            errors,
        }
    }
}

/// Operation-level `security` overrides the global one; an explicit empty array clears it.
/// A non-array value (e.g. `security:` left blank in YAML) counts as absent.
fn effective_security<'v>(operation: &'v Value, document: &Document<'v>) -> Option<&'v Vec<Value>> {
    operation
        .get("security")
        .and_then(Value::as_array)
        .or_else(|| document.global_security())
}

/// Scheme names across all requirement objects, deduplicated in first-seen order.
fn scheme_names(requirements: Option<&Vec<Value>>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for requirement in requirements.into_iter().flatten() {
        if let Some(map) = requirement.as_object() {
            for name in map.keys() {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
        }
    }
    names
}

fn has_credential_parameter(parameters: &[Parameter]) -> bool {
    parameters.iter().any(|p| {
        let name = p.name.to_ascii_lowercase();
        name == "authorization" || AUTH_PARAM_MARKERS.iter().any(|m| name.contains(m))
    })
}

fn text(node: &Value, key: &str) -> Option<String> {
    node.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
}
