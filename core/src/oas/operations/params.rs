#![deny(missing_docs)]

//! # Parameter Resolution
//!
//! Resolves inline and referenced parameters (OpenAPI 3 and Swagger 2.0 shapes)
//! and attaches an example to each.

use crate::oas::document::Document;
use crate::oas::examples::ExampleSynthesizer;
use crate::oas::models::{ParamLocation, Parameter};
use crate::oas::resolver::SchemaResolver;
use crate::oas::schema::Schema;
use serde_json::Value;
use std::collections::HashSet;

/// Resolves the parameters of one operation.
///
/// Operation-level parameters come first and take precedence over path-item-level
/// parameters with the same `(name, in)` pair.
pub(crate) fn collect_parameters(
    path_item: &Value,
    operation: &Value,
    resolver: &SchemaResolver<'_>,
    synthesizer: &ExampleSynthesizer<'_, '_>,
) -> Vec<Parameter> {
    let op_params = resolve_list(operation.get("parameters"), resolver, synthesizer);
    let common_params = resolve_list(path_item.get("parameters"), resolver, synthesizer);

    let mut seen = HashSet::new();
    let mut params = Vec::with_capacity(op_params.len() + common_params.len());

    for p in op_params {
        seen.insert((p.name.clone(), p.location));
        params.push(p);
    }
    for p in common_params {
        if !seen.contains(&(p.name.clone(), p.location)) {
            params.push(p);
        }
    }
    params
}

fn resolve_list(
    raw: Option<&Value>,
    resolver: &SchemaResolver<'_>,
    synthesizer: &ExampleSynthesizer<'_, '_>,
) -> Vec<Parameter> {
    raw.and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|p| resolve_parameter(p, resolver, synthesizer))
                .collect()
        })
        .unwrap_or_default()
}

fn resolve_parameter(
    raw: &Value,
    resolver: &SchemaResolver<'_>,
    synthesizer: &ExampleSynthesizer<'_, '_>,
) -> Option<Parameter> {
    let document: &Document<'_> = resolver.document();
    let param = match document.deref_node(raw) {
        Ok(param) => param,
        Err(err) => {
            log::warn!("{}; parameter skipped", err);
            return None;
        }
    };

    let Some(name) = param.get("name").and_then(Value::as_str) else {
        log::warn!("Parameter without a 'name' skipped");
        return None;
    };
    let location_raw = param.get("in").and_then(Value::as_str).unwrap_or_default();
    let Some(location) = ParamLocation::parse(location_raw) else {
        log::warn!(
            "Parameter '{}' has unsupported location '{}'; skipped",
            name,
            location_raw
        );
        return None;
    };

    let schema = parameter_schema(param);
    let example = declared_example(param, document).unwrap_or_else(|| synthesizer.example_for(&schema));

    Some(Parameter {
        name: name.to_string(),
        location,
        required: location == ParamLocation::Path
            || param.get("required").and_then(Value::as_bool).unwrap_or(false),
        description: param
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        schema: resolver.resolve_or_opaque(&schema),
        example,
    })
}

/// OpenAPI 3 uses `schema` (or `content`); Swagger 2.0 non-body parameters
/// carry `type`/`format`/`items`/`enum` inline.
fn parameter_schema(param: &Value) -> Schema {
    if let Some(raw) = param.get("schema") {
        return Schema::from_value(raw);
    }
    if let Some(raw) = param
        .get("content")
        .and_then(Value::as_object)
        .and_then(|content| content.values().next())
        .and_then(|media| media.get("schema"))
    {
        return Schema::from_value(raw);
    }
    let mut schema = Schema::from_value(param);
    // The parameter's own description/example are not schema annotations.
    schema.description = None;
    schema.example = None;
    schema
}

fn declared_example(param: &Value, document: &Document<'_>) -> Option<Value> {
    if let Some(example) = param.get("example") {
        return Some(example.clone());
    }
    let entry = param.get("examples")?.as_object()?.values().next()?;
    document
        .deref_node(entry)
        .ok()
        .and_then(|example| example.get("value").cloned())
}
