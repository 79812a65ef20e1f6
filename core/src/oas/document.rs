#![deny(missing_docs)]

//! # OpenAPI Document View
//!
//! A read-only wrapper over the raw JSON tree handed to us by the loader.
//! It sniffs the document flavour (OpenAPI 3.x vs Swagger 2.x) and offers the
//! handful of lookups the rest of the pipeline needs. The tree is never mutated.

use crate::error::{AppError, AppResult};
use crate::oas::ref_utils::lookup_pointer;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Maximum number of `$ref` hops followed for non-schema objects (parameters, responses, ...).
const MAX_REF_HOPS: usize = 32;

/// The document flavour, detected from the top-level version marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "version", rename_all = "camelCase")]
pub enum SpecVersion {
    /// `openapi: 3.x`
    OpenApi3(String),
    /// `swagger: 2.x`
    Swagger2(String),
    /// Neither marker was found (or it carried an unsupported major version).
    Unknown,
}

impl SpecVersion {
    /// Detects the flavour from the raw document root.
    pub fn detect(raw: &Value) -> Self {
        if let Some(version) = raw.get("openapi").and_then(version_string) {
            if version.starts_with("3.") {
                return SpecVersion::OpenApi3(version);
            }
        }
        if let Some(version) = raw.get("swagger").and_then(version_string) {
            if version.starts_with("2.") {
                return SpecVersion::Swagger2(version);
            }
        }
        SpecVersion::Unknown
    }

    /// Returns `true` for Swagger 2.x documents.
    pub fn is_swagger2(&self) -> bool {
        matches!(self, SpecVersion::Swagger2(_))
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecVersion::OpenApi3(v) => write!(f, "OpenAPI {}", v),
            SpecVersion::Swagger2(v) => write!(f, "Swagger {}", v),
            SpecVersion::Unknown => write!(f, "unknown"),
        }
    }
}

/// Version markers are sometimes written as YAML numbers (`swagger: 2.0`).
fn version_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => {
            let text = n.to_string();
            if text.contains('.') {
                Some(text)
            } else {
                Some(format!("{}.0", text))
            }
        }
        _ => None,
    }
}

/// Top-level `info` metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    /// `info.title`, empty when absent.
    pub title: String,
    /// `info.version`, empty when absent.
    pub version: String,
    /// `info.description`.
    pub description: Option<String>,
}

/// Read-only view of a raw OpenAPI / Swagger document.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    raw: &'a Value,
    version: SpecVersion,
}

impl<'a> Document<'a> {
    /// Wraps a parsed document. Unknown flavours are accepted with a warning.
    pub fn new(raw: &'a Value) -> Self {
        let version = SpecVersion::detect(raw);
        if version == SpecVersion::Unknown {
            log::warn!(
                "Document has no recognised 'openapi: 3.x' or 'swagger: 2.x' marker; continuing anyway"
            );
        }
        Self { raw, version }
    }

    /// The raw JSON tree.
    pub fn raw(&self) -> &'a Value {
        self.raw
    }

    /// The detected flavour.
    pub fn version(&self) -> &SpecVersion {
        &self.version
    }

    /// Looks up a local `$ref` pointer (e.g. `#/components/schemas/User`).
    pub fn lookup(&self, pointer: &str) -> AppResult<&'a Value> {
        lookup_pointer(self.raw, pointer).ok_or_else(|| AppError::reference_not_found(pointer))
    }

    /// Follows `$ref` hops on a non-schema object (Parameter, Response, Request Body, Example)
    /// until a concrete node is reached.
    pub fn deref_node(&self, node: &'a Value) -> AppResult<&'a Value> {
        let mut current = node;
        let mut seen: Vec<&str> = Vec::new();
        while let Some(pointer) = current.get("$ref").and_then(Value::as_str) {
            if seen.contains(&pointer) || seen.len() >= MAX_REF_HOPS {
                return Err(AppError::CircularReference {
                    pointer: pointer.to_string(),
                });
            }
            seen.push(pointer);
            current = self.lookup(pointer)?;
        }
        Ok(current)
    }

    /// The `paths` object, if present and well-formed.
    pub fn paths(&self) -> Option<&'a Map<String, Value>> {
        self.raw.get("paths").and_then(Value::as_object)
    }

    /// Global `security` requirements, if declared.
    pub fn global_security(&self) -> Option<&'a Vec<Value>> {
        self.raw.get("security").and_then(Value::as_array)
    }

    /// Extracts `info` metadata, tolerating its absence.
    pub fn info(&self) -> DocumentInfo {
        let info = self.raw.get("info");
        let text = |key: &str| {
            info.and_then(|i| i.get(key))
                .and_then(version_string_or_str)
                .unwrap_or_default()
        };
        DocumentInfo {
            title: text("title"),
            version: text("version"),
            description: info
                .and_then(|i| i.get("description"))
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// The description declared for a tag in the top-level `tags` list.
    pub fn tag_description(&self, name: &str) -> Option<&'a str> {
        self.raw
            .get("tags")
            .and_then(Value::as_array)?
            .iter()
            .find(|tag| tag.get("name").and_then(Value::as_str) == Some(name))
            .and_then(|tag| tag.get("description"))
            .and_then(Value::as_str)
    }
}

fn version_string_or_str(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
