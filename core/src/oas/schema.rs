#![deny(missing_docs)]

//! # Schema Model
//!
//! A tagged representation of JSON-Schema-like nodes found in OpenAPI documents.
//!
//! Raw nodes are classified once, up front, so that resolution and example
//! synthesis become exhaustive matches over [`SchemaNode`] rather than ad hoc
//! probing of untyped maps.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Scalar JSON types a primitive schema may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    /// `string`
    String,
    /// `number`
    Number,
    /// `integer`
    Integer,
    /// `boolean`
    Boolean,
    /// `null`
    Null,
}

impl PrimitiveType {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            "null" => Some(Self::Null),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }
}

/// A scalar (or untyped) schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrimitiveSchema {
    /// Declared type. `None` when absent or unrecognised.
    pub ty: Option<PrimitiveType>,
    /// Declared `format` (e.g. `email`, `date-time`).
    pub format: Option<String>,
    /// Declared `enum` values, in order.
    pub enum_values: Vec<Value>,
}

/// An object schema with declared properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    /// Properties in declaration order.
    pub properties: IndexMap<String, Schema>,
    /// Names listed in `required`.
    pub required: Vec<String>,
}

/// An array schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArraySchema {
    /// The element schema, if declared.
    pub items: Option<Box<Schema>>,
}

/// Which composition keyword produced a [`CompositeSchema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeKind {
    /// `allOf`
    AllOf,
    /// `oneOf`
    OneOf,
    /// `anyOf`
    AnyOf,
}

impl CompositeKind {
    fn keyword(self) -> &'static str {
        match self {
            Self::AllOf => "allOf",
            Self::OneOf => "oneOf",
            Self::AnyOf => "anyOf",
        }
    }
}

/// A composition of member schemas.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeSchema {
    /// The composition keyword.
    pub kind: CompositeKind,
    /// Members in declaration order.
    pub members: Vec<Schema>,
}

/// The shape of a schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// `type` + optional `format` / `enum`.
    Primitive(PrimitiveSchema),
    /// `properties` (+ `required`).
    Object(ObjectSchema),
    /// `items`.
    Array(ArraySchema),
    /// `$ref` pointer, kept verbatim.
    Reference(String),
    /// `allOf` / `oneOf` / `anyOf`.
    Composite(CompositeSchema),
}

/// A schema node plus the annotations that matter for documentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// The classified shape.
    pub node: SchemaNode,
    /// Explicit `example`, which always wins during synthesis.
    pub example: Option<Value>,
    /// `description`.
    pub description: Option<String>,
}

impl Schema {
    /// Wraps a node without annotations.
    pub fn new(node: SchemaNode) -> Self {
        Self {
            node,
            example: None,
            description: None,
        }
    }

    /// The opaque stand-in used when a reference cannot be resolved.
    pub fn empty_object() -> Self {
        Self::new(SchemaNode::Object(ObjectSchema::default()))
    }

    /// Builds a `$ref` node.
    pub fn reference(pointer: impl Into<String>) -> Self {
        Self::new(SchemaNode::Reference(pointer.into()))
    }

    /// Classifies a raw JSON node.
    ///
    /// Priority: `$ref`, then composition keywords, then object, array, primitive.
    /// Boolean schemas and non-object values become an untyped primitive.
    pub fn from_value(raw: &Value) -> Self {
        let Some(map) = raw.as_object() else {
            return Self::new(SchemaNode::Primitive(PrimitiveSchema::default()));
        };

        let node = classify(map);
        Self {
            node,
            example: map.get("example").cloned(),
            description: map
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// Returns the object part, if this node is an object schema.
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match &self.node {
            SchemaNode::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Renders the node back into its JSON form.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        match &self.node {
            SchemaNode::Primitive(p) => {
                if let Some(ty) = p.ty {
                    map.insert("type".into(), Value::String(ty.as_str().into()));
                }
                if let Some(format) = &p.format {
                    map.insert("format".into(), Value::String(format.clone()));
                }
                if !p.enum_values.is_empty() {
                    map.insert("enum".into(), Value::Array(p.enum_values.clone()));
                }
            }
            SchemaNode::Object(obj) => {
                map.insert("type".into(), Value::String("object".into()));
                let props = obj
                    .properties
                    .iter()
                    .map(|(name, schema)| (name.clone(), schema.to_value()))
                    .collect();
                map.insert("properties".into(), Value::Object(props));
                if !obj.required.is_empty() {
                    let required = obj.required.iter().cloned().map(Value::String).collect();
                    map.insert("required".into(), Value::Array(required));
                }
            }
            SchemaNode::Array(arr) => {
                map.insert("type".into(), Value::String("array".into()));
                if let Some(items) = &arr.items {
                    map.insert("items".into(), items.to_value());
                }
            }
            SchemaNode::Reference(pointer) => {
                map.insert("$ref".into(), Value::String(pointer.clone()));
            }
            SchemaNode::Composite(c) => {
                let members = c.members.iter().map(Schema::to_value).collect();
                map.insert(c.kind.keyword().into(), Value::Array(members));
            }
        }
        if let Some(description) = &self.description {
            map.insert("description".into(), Value::String(description.clone()));
        }
        if let Some(example) = &self.example {
            map.insert("example".into(), example.clone());
        }
        Value::Object(map)
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

fn classify(map: &Map<String, Value>) -> SchemaNode {
    if let Some(pointer) = map.get("$ref").and_then(Value::as_str) {
        return SchemaNode::Reference(pointer.to_string());
    }

    for kind in [CompositeKind::AllOf, CompositeKind::OneOf, CompositeKind::AnyOf] {
        if let Some(members) = map.get(kind.keyword()).and_then(Value::as_array) {
            let members: Vec<Schema> = members.iter().map(Schema::from_value).collect();
            return with_sibling_properties(map, CompositeSchema { kind, members });
        }
    }

    let ty = declared_type(map);

    if ty == Some("object") || map.contains_key("properties") {
        return SchemaNode::Object(object_schema(map));
    }

    if ty == Some("array") || map.contains_key("items") {
        let items = map
            .get("items")
            .filter(|raw| raw.is_object())
            .map(|raw| Box::new(Schema::from_value(raw)));
        return SchemaNode::Array(ArraySchema { items });
    }

    SchemaNode::Primitive(PrimitiveSchema {
        ty: ty.and_then(PrimitiveType::parse),
        format: map
            .get("format")
            .and_then(Value::as_str)
            .map(str::to_string),
        enum_values: map
            .get("enum")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
    })
}

/// Properties declared next to a composition keyword apply on top of it, so they
/// become a leading `allOf` member (wrapping a `oneOf`/`anyOf` when needed).
fn with_sibling_properties(map: &Map<String, Value>, composite: CompositeSchema) -> SchemaNode {
    if !map.contains_key("properties") {
        return SchemaNode::Composite(composite);
    }
    let sibling = Schema::new(SchemaNode::Object(object_schema(map)));
    let members = match composite.kind {
        CompositeKind::AllOf => std::iter::once(sibling).chain(composite.members).collect(),
        CompositeKind::OneOf | CompositeKind::AnyOf => {
            vec![sibling, Schema::new(SchemaNode::Composite(composite))]
        }
    };
    SchemaNode::Composite(CompositeSchema {
        kind: CompositeKind::AllOf,
        members,
    })
}

fn object_schema(map: &Map<String, Value>) -> ObjectSchema {
    let properties = map
        .get("properties")
        .and_then(Value::as_object)
        .map(|props| {
            props
                .iter()
                .map(|(name, raw)| (name.clone(), Schema::from_value(raw)))
                .collect()
        })
        .unwrap_or_default();
    let required = map
        .get("required")
        .and_then(Value::as_array)
        .map(|names| {
            names
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    ObjectSchema {
        properties,
        required,
    }
}

/// `type` may be a string or (OAS 3.1) a list such as `["string", "null"]`.
fn declared_type(map: &Map<String, Value>) -> Option<&str> {
    match map.get("type")? {
        Value::String(s) => Some(s.as_str()),
        Value::Array(types) => {
            let names: Vec<&str> = types.iter().filter_map(Value::as_str).collect();
            names
                .iter()
                .copied()
                .find(|name| *name != "null")
                .or_else(|| names.first().copied())
        }
        _ => None,
    }
}
