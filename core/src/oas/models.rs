#![deny(missing_docs)]

//! # Documentation Models
//!
//! The normalized output of the pipeline: sections (by tag) containing modules
//! (by operation intent) containing fully resolved endpoint descriptors.
//!
//! Every type serializes to camelCase JSON so the model can be handed as-is to a
//! template renderer or exposed from a `/config`-style endpoint.

use crate::oas::document::SpecVersion;
use crate::oas::schema::Schema;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// HTTP verbs that produce endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
    /// PATCH
    Patch,
    /// OPTIONS
    Options,
    /// HEAD
    Head,
}

impl HttpMethod {
    /// Maps a path-item key (`get`, `post`, ...) to a method. Other keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            "delete" => Some(Self::Delete),
            "patch" => Some(Self::Patch),
            "options" => Some(Self::Options),
            "head" => Some(Self::Head),
            _ => None,
        }
    }

    /// Upper-case wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Options => "OPTIONS",
            Self::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The location of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamLocation {
    /// Query string.
    Query,
    /// Templated path segment.
    Path,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
    /// Swagger 2.0 body parameter.
    Body,
    /// Swagger 2.0 form field.
    FormData,
}

impl ParamLocation {
    /// Parses the `in` field of a parameter.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "query" => Some(Self::Query),
            "path" => Some(Self::Path),
            "header" => Some(Self::Header),
            "cookie" => Some(Self::Cookie),
            "body" => Some(Self::Body),
            "formData" => Some(Self::FormData),
            _ => None,
        }
    }
}

/// A resolved parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Location.
    #[serde(rename = "in")]
    pub location: ParamLocation,
    /// Whether the parameter must be supplied. Path parameters always are.
    pub required: bool,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The resolved schema.
    pub schema: Schema,
    /// Declared or synthesized example.
    pub example: Value,
}

/// The JSON request body of an endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    /// The media type key the example was taken from.
    pub content_type: String,
    /// Whether the body is required.
    pub required: bool,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared or synthesized example. `None` if the media type has neither schema nor example.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

/// A documented failure response (status >= 400).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDescriptor {
    /// HTTP status code.
    pub status: u16,
    /// Response description as declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Human-readable message: payload `message`, else description, else `Error <status>`.
    pub message: String,
    /// Synthesized error payload, when the response declares JSON content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

/// One HTTP operation, fully resolved for documentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDescriptor {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path template, e.g. `/users/{id}`.
    pub path: String,
    /// `operationId`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags as declared on the operation.
    pub tags: Vec<String>,
    /// Whether the operation is marked deprecated.
    pub deprecated: bool,
    /// Derived authentication requirement.
    pub requires_auth: bool,
    /// Names of the security schemes that apply.
    pub security_schemes: Vec<String>,
    /// Parameters (path-item level merged with operation level).
    pub parameters: Vec<Parameter>,
    /// JSON request body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Selected success status (200 when none is declared).
    pub success_status: u16,
    /// Description of the selected success response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_description: Option<String>,
    /// Example of the success payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_example: Option<Value>,
    /// Error responses in ascending status order.
    pub errors: Vec<ErrorDescriptor>,
}

/// Endpoints that share an inferred intent within one section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Slug, unique within the section.
    pub id: String,
    /// Display name.
    pub name: String,
    /// First non-empty description among the endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Endpoints in document order.
    pub endpoints: Vec<EndpointDescriptor>,
}

/// All modules sharing one tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Slug, unique across sections.
    pub id: String,
    /// The tag name.
    pub name: String,
    /// Description from the top-level `tags` declaration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Modules in first-appearance order.
    pub modules: Vec<Module>,
}

impl Section {
    /// Iterates all endpoints of the section.
    pub fn endpoints(&self) -> impl Iterator<Item = &EndpointDescriptor> {
        self.modules.iter().flat_map(|m| m.endpoints.iter())
    }
}

/// The complete documentation model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDocumentation {
    /// `info.title`.
    pub title: String,
    /// `info.version`.
    pub version: String,
    /// `info.description`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Detected document flavour.
    pub spec_version: SpecVersion,
    /// Sections in first-appearance order.
    pub sections: Vec<Section>,
}

impl ApiDocumentation {
    /// Total endpoint count across all sections (tag fan-out copies included).
    pub fn endpoint_count(&self) -> usize {
        self.sections.iter().map(|s| s.endpoints().count()).sum()
    }
}
