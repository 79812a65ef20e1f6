#![deny(missing_docs)]

//! # Example Synthesis
//!
//! Produces a concrete, deterministic example value for any schema node.
//!
//! Precedence: explicit `example` > cycle sentinel > structural synthesis
//! (object / array) > first `enum` value > `type` + `format` placeholder.

use crate::oas::resolver::{Origins, SchemaResolver};
use crate::oas::schema::{PrimitiveSchema, PrimitiveType, Schema, SchemaNode};
use serde_json::{json, Map, Value};
use std::collections::HashSet;

/// Value emitted at the position where a schema would recurse into itself.
pub const CIRCULAR_REFERENCE: &str = "[Circular Reference]";

/// Synthesizes example values, resolving references through a [`SchemaResolver`].
pub struct ExampleSynthesizer<'r, 'a> {
    resolver: &'r SchemaResolver<'a>,
}

impl<'r, 'a> ExampleSynthesizer<'r, 'a> {
    /// Creates a synthesizer backed by `resolver`.
    pub fn new(resolver: &'r SchemaResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Synthesizes a root example with a fresh cycle guard.
    pub fn example_for(&self, schema: &Schema) -> Value {
        let mut visiting = HashSet::new();
        self.synthesize(schema, &mut visiting)
    }

    /// Synthesizes an example for `schema`.
    ///
    /// `visiting` holds the pointers currently being expanded on this branch.
    /// Pointers are inserted before descending and removed on the way back, so the
    /// set is empty again once the call returns.
    pub fn synthesize(&self, schema: &Schema, visiting: &mut HashSet<String>) -> Value {
        self.synthesize_node(schema, &Origins::new(), visiting)
    }

    /// `origins` maps merged `allOf` properties to the pointers of the member that
    /// supplied them; those pointers are only entered while that property is expanded.
    fn synthesize_node(
        &self,
        schema: &Schema,
        origins: &Origins,
        visiting: &mut HashSet<String>,
    ) -> Value {
        if let Some(example) = &schema.example {
            return example.clone();
        }

        match &schema.node {
            SchemaNode::Reference(_) | SchemaNode::Composite(_) => {
                self.synthesize_resolved(schema, visiting)
            }
            SchemaNode::Object(obj) => {
                let mut out = Map::new();
                for (name, prop) in &obj.properties {
                    let member_trail = origins.get(name).map(Vec::as_slice).unwrap_or_default();
                    let entered = enter(member_trail, visiting);
                    out.insert(name.clone(), self.synthesize(prop, visiting));
                    leave(&entered, visiting);
                }
                Value::Object(out)
            }
            SchemaNode::Array(arr) => match &arr.items {
                Some(items) => Value::Array(vec![self.synthesize(items, visiting)]),
                None => Value::Array(Vec::new()),
            },
            SchemaNode::Primitive(p) => primitive_example(p),
        }
    }

    fn synthesize_resolved(&self, schema: &Schema, visiting: &mut HashSet<String>) -> Value {
        let resolved = match self.resolver.resolve(schema) {
            Ok(resolved) => resolved,
            Err(err) => {
                log::warn!("{}; example falls back to an empty object", err);
                return Value::Object(Map::new());
            }
        };

        // A merged member that is already being expanded makes the whole node recursive.
        let recursive = resolved
            .trail
            .iter()
            .chain(resolved.origins.values().flatten())
            .any(|pointer| visiting.contains(pointer));
        if recursive {
            return Value::String(CIRCULAR_REFERENCE.to_string());
        }

        let entered = enter(&resolved.trail, visiting);
        let value = self.synthesize_node(&resolved.schema, &resolved.origins, visiting);
        leave(&entered, visiting);
        value
    }
}

/// Inserts `pointers` into `visiting`, returning the ones that were not there yet.
fn enter(pointers: &[String], visiting: &mut HashSet<String>) -> Vec<String> {
    pointers
        .iter()
        .filter(|pointer| visiting.insert((*pointer).clone()))
        .cloned()
        .collect()
}

fn leave(entered: &[String], visiting: &mut HashSet<String>) {
    for pointer in entered {
        visiting.remove(pointer);
    }
}

/// Placeholder for scalar schemas.
fn primitive_example(schema: &PrimitiveSchema) -> Value {
    if let Some(first) = schema.enum_values.first() {
        return first.clone();
    }

    match schema.ty {
        Some(PrimitiveType::String) => Value::String(string_example(schema.format.as_deref())),
        Some(PrimitiveType::Integer) | Some(PrimitiveType::Number) => json!(123),
        Some(PrimitiveType::Boolean) => Value::Bool(true),
        Some(PrimitiveType::Null) | None => Value::Null,
    }
}

fn string_example(format: Option<&str>) -> String {
    match format {
        Some("email") => "user@example.com",
        Some("date-time") => "2024-01-01T00:00:00Z",
        Some("date") => "2024-01-01",
        Some("uuid") => "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        Some("uri") | Some("url") => "https://example.com",
        Some("hostname") => "example.com",
        Some("ipv4") => "192.168.0.1",
        Some("ipv6") => "::1",
        Some("password") => "********",
        _ => "string",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::document::Document;
    use pretty_assertions::assert_eq;

    fn synth(raw_doc: &Value, schema: Value) -> Value {
        let resolver = SchemaResolver::new(Document::new(raw_doc));
        let synthesizer = ExampleSynthesizer::new(&resolver);
        synthesizer.example_for(&Schema::from_value(&schema))
    }

    fn doc(schemas: Value) -> Value {
        json!({"openapi": "3.0.0", "info": {}, "paths": {}, "components": {"schemas": schemas}})
    }

    #[test]
    fn test_primitives_and_formats() {
        let d = doc(json!({}));
        assert_eq!(synth(&d, json!({"type": "string"})), json!("string"));
        assert_eq!(
            synth(&d, json!({"type": "string", "format": "email"})),
            json!("user@example.com")
        );
        assert_eq!(
            synth(&d, json!({"type": "string", "format": "date-time"})),
            json!("2024-01-01T00:00:00Z")
        );
        assert_eq!(
            synth(&d, json!({"type": "string", "format": "date"})),
            json!("2024-01-01")
        );
        assert_eq!(
            synth(&d, json!({"type": "string", "format": "uuid"})),
            json!("3fa85f64-5717-4562-b3fc-2c963f66afa6")
        );
        assert_eq!(
            synth(&d, json!({"type": "string", "format": "uri"})),
            json!("https://example.com")
        );
        assert_eq!(
            synth(&d, json!({"type": "string", "format": "made-up"})),
            json!("string")
        );
        assert_eq!(synth(&d, json!({"type": "integer"})), json!(123));
        assert_eq!(synth(&d, json!({"type": "number"})), json!(123));
        assert_eq!(synth(&d, json!({"type": "boolean"})), json!(true));
        assert_eq!(synth(&d, json!({})), Value::Null);
        assert_eq!(synth(&d, json!({"type": "file"})), Value::Null);
    }

    #[test]
    fn test_enum_takes_first_value() {
        let d = doc(json!({}));
        assert_eq!(
            synth(&d, json!({"type": "string", "enum": ["active", "banned"]})),
            json!("active")
        );
    }

    #[test]
    fn test_explicit_example_wins() {
        let d = doc(json!({}));
        let schema = json!({
            "type": "object",
            "example": "X",
            "properties": {"id": {"type": "integer"}}
        });
        assert_eq!(synth(&d, schema), json!("X"));
        assert_eq!(
            synth(&d, json!({"type": "integer", "example": "X"})),
            json!("X")
        );
    }

    #[test]
    fn test_object_keeps_declaration_order() {
        let d = doc(json!({}));
        let value = synth(
            &d,
            json!({
                "type": "object",
                "properties": {
                    "zeta": {"type": "string"},
                    "alpha": {"type": "integer"},
                    "tags": {"type": "array", "items": {"type": "string"}}
                }
            }),
        );
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "tags"]);
        assert_eq!(value["tags"], json!(["string"]));
    }

    #[test]
    fn test_array_without_items_is_empty() {
        let d = doc(json!({}));
        assert_eq!(synth(&d, json!({"type": "array"})), json!([]));
    }

    #[test]
    fn test_self_reference_terminates_with_sentinel() {
        let d = doc(json!({
            "Node": {
                "type": "object",
                "properties": {
                    "name": {"type": "string"},
                    "parent": {"$ref": "#/components/schemas/Node"},
                    "children": {"type": "array", "items": {"$ref": "#/components/schemas/Node"}}
                }
            }
        }));
        let value = synth(&d, json!({"$ref": "#/components/schemas/Node"}));
        assert_eq!(
            value,
            json!({
                "name": "string",
                "parent": CIRCULAR_REFERENCE,
                "children": [CIRCULAR_REFERENCE]
            })
        );
    }

    #[test]
    fn test_mutual_recursion_terminates() {
        let d = doc(json!({
            "A": {"type": "object", "properties": {"b": {"$ref": "#/components/schemas/B"}}},
            "B": {"type": "object", "properties": {"a": {"$ref": "#/components/schemas/A"}}}
        }));
        let value = synth(&d, json!({"$ref": "#/components/schemas/A"}));
        assert_eq!(value, json!({"b": {"a": CIRCULAR_REFERENCE}}));
    }

    #[test]
    fn test_cycle_through_all_of_terminates() {
        let d = doc(json!({
            "Tree": {
                "allOf": [
                    {"type": "object", "properties": {"id": {"type": "integer"}}},
                    {"properties": {"next": {"allOf": [{"$ref": "#/components/schemas/Tree"}]}}}
                ]
            }
        }));
        let value = synth(&d, json!({"$ref": "#/components/schemas/Tree"}));
        assert_eq!(value, json!({"id": 123, "next": CIRCULAR_REFERENCE}));
    }

    #[test]
    fn test_all_of_base_reused_as_property_is_not_a_cycle() {
        let d = doc(json!({
            "Person": {"type": "object", "properties": {"name": {"type": "string"}}},
            "Employee": {
                "allOf": [
                    {"$ref": "#/components/schemas/Person"},
                    {"properties": {"manager": {"$ref": "#/components/schemas/Person"}}}
                ]
            }
        }));
        let value = synth(&d, json!({"$ref": "#/components/schemas/Employee"}));
        assert_eq!(value, json!({"name": "string", "manager": {"name": "string"}}));
    }

    #[test]
    fn test_all_of_property_back_to_its_own_member_is_a_cycle() {
        let d = doc(json!({
            "Base": {
                "type": "object",
                "properties": {
                    "id": {"type": "integer"},
                    "parent": {"$ref": "#/components/schemas/Base"}
                }
            },
            "Employee": {
                "allOf": [
                    {"$ref": "#/components/schemas/Base"},
                    {"properties": {"boss": {"$ref": "#/components/schemas/Employee"}}}
                ]
            }
        }));
        let value = synth(&d, json!({"$ref": "#/components/schemas/Employee"}));
        assert_eq!(
            value,
            json!({"id": 123, "parent": CIRCULAR_REFERENCE, "boss": CIRCULAR_REFERENCE})
        );
    }

    #[test]
    fn test_sibling_references_are_not_cycles() {
        let d = doc(json!({
            "Money": {"type": "object", "properties": {"amount": {"type": "number"}}},
            "Order": {
                "type": "object",
                "properties": {
                    "total": {"$ref": "#/components/schemas/Money"},
                    "tax": {"$ref": "#/components/schemas/Money"}
                }
            }
        }));
        let value = synth(&d, json!({"$ref": "#/components/schemas/Order"}));
        assert_eq!(
            value,
            json!({"total": {"amount": 123}, "tax": {"amount": 123}})
        );
    }

    #[test]
    fn test_missing_reference_yields_empty_object() {
        let d = doc(json!({}));
        assert_eq!(
            synth(&d, json!({"$ref": "#/components/schemas/Ghost"})),
            json!({})
        );
    }

    #[test]
    fn test_one_of_uses_first_branch() {
        let d = doc(json!({}));
        assert_eq!(
            synth(
                &d,
                json!({"oneOf": [{"type": "string", "format": "email"}, {"type": "integer"}]})
            ),
            json!("user@example.com")
        );
    }

    #[test]
    fn test_discriminated_union_keeps_shared_properties() {
        let d = doc(json!({}));
        let schema = json!({
            "type": "object",
            "properties": {"id": {"type": "integer"}},
            "oneOf": [
                {"properties": {"a": {"type": "string"}}},
                {"properties": {"b": {"type": "boolean"}}}
            ]
        });
        assert_eq!(synth(&d, schema), json!({"id": 123, "a": "string"}));
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let d = doc(json!({
            "User": {
                "type": "object",
                "properties": {
                    "id": {"type": "string", "format": "uuid"},
                    "friends": {"type": "array", "items": {"$ref": "#/components/schemas/User"}},
                    "role": {"enum": ["admin", "member"]}
                }
            }
        }));
        let schema = json!({"$ref": "#/components/schemas/User"});
        assert_eq!(synth(&d, schema.clone()), synth(&d, schema));
    }

    #[test]
    fn test_visiting_set_is_restored() {
        let d = doc(json!({
            "Leaf": {"type": "object", "properties": {"v": {"type": "boolean"}}}
        }));
        let resolver = SchemaResolver::new(Document::new(&d));
        let synthesizer = ExampleSynthesizer::new(&resolver);
        let mut visiting = HashSet::new();
        synthesizer.synthesize(&Schema::reference("#/components/schemas/Leaf"), &mut visiting);
        assert!(visiting.is_empty());
    }
}
