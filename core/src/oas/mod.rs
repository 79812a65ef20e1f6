#![deny(missing_docs)]

//! # OpenAPI Documentation Module
//!
//! - **document**: Read-only view over the raw document (version, info, `$ref` lookups).
//! - **schema**: Tagged schema model built from raw JSON Schema nodes.
//! - **resolver**: `$ref` and `allOf` resolution with a per-document cache.
//! - **examples**: Example synthesis with cycle detection.
//! - **operations**: Operation -> endpoint descriptor extraction.
//! - **grouping**: Sections (by tag) and modules (by operation name).
//! - **models**: The serializable output model.

pub mod document;
pub mod examples;
pub mod grouping;
pub mod models;
pub mod operations;
pub mod resolver;
pub mod schema;

mod ref_utils;

pub use document::{Document, DocumentInfo, SpecVersion};
pub use examples::{ExampleSynthesizer, CIRCULAR_REFERENCE};
pub use grouping::{build_documentation, group, GroupingEngine};
pub use models::{
    ApiDocumentation, EndpointDescriptor, ErrorDescriptor, HttpMethod, Module, ParamLocation,
    Parameter, RequestBody, Section,
};
pub use operations::OperationExtractor;
pub use resolver::{Origins, Resolved, SchemaResolver};
pub use schema::{
    ArraySchema, CompositeKind, CompositeSchema, ObjectSchema, PrimitiveSchema, PrimitiveType,
    Schema, SchemaNode,
};
