#![deny(missing_docs)]

//! # API Doc Core
//!
//! Turns an OpenAPI 3.x / Swagger 2.0 document (already parsed into a
//! `serde_json::Value`) into a documentation model: sections by tag, modules by
//! operation, and endpoint descriptors with synthesized examples.

/// Shared error types.
pub mod error;

/// Grouping configuration.
pub mod config;

/// OpenAPI (OAS) documentation pipeline.
pub mod oas;

pub use config::{DocConfig, IdCollisionPolicy, DEFAULT_TAG};
pub use error::{AppError, AppResult};
pub use oas::{
    build_documentation, group, ApiDocumentation, Document, EndpointDescriptor, ErrorDescriptor,
    ExampleSynthesizer, GroupingEngine, HttpMethod, Module, OperationExtractor, ParamLocation,
    Parameter, RequestBody, Schema, SchemaResolver, Section, SpecVersion, CIRCULAR_REFERENCE,
};
