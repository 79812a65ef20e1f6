#![deny(missing_docs)]

//! # Resolver Module
//!
//! Resolves `$ref` pointers and flattens composition keywords into a schema that
//! can be inspected directly.
//!
//! Handles:
//! - Local pointers (`#/components/schemas/..`, `#/definitions/..`, any JSON Pointer).
//! - Alias chains (`A -> $ref B -> $ref C`).
//! - `allOf` shallow merge (last write wins on property collisions), remembering
//!   which member every merged property came from.
//! - `oneOf` / `anyOf` narrowing to the first member.
//!
//! Property schemas are left untouched; nested references are resolved lazily
//! by whoever walks into them.

use crate::error::{AppError, AppResult};
use crate::oas::document::Document;
use crate::oas::schema::{CompositeKind, ObjectSchema, Schema, SchemaNode};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// The outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// A node that is never a `Reference` nor a `Composite`.
    pub schema: Schema,
    /// Pointers dereferenced on the way to `schema`, in visit order.
    ///
    /// Pointers reached only as `allOf` members are not listed here; they are
    /// kept per property in `origins`.
    pub trail: Vec<String>,
    /// For a merged `allOf` object: property name -> pointers of the member that
    /// supplied it. Empty for every other kind of result.
    pub origins: Origins,
}

/// Property name -> pointers dereferenced to reach the `allOf` member declaring it.
pub type Origins = IndexMap<String, Vec<String>>;

/// A resolved node plus the provenance of its merged properties.
struct Flat {
    schema: Schema,
    origins: Origins,
}

impl Flat {
    fn plain(schema: Schema) -> Self {
        Self {
            schema,
            origins: Origins::new(),
        }
    }

    fn annotate(mut self, origin: &Schema) -> Self {
        self.schema = annotate(self.schema, origin);
        self
    }
}

/// Bookkeeping for a single `resolve` call.
#[derive(Default)]
struct Walk {
    /// Pointers on the current alias chain (stack).
    chain: Vec<String>,
    /// Every pointer dereferenced so far.
    trail: Vec<String>,
}

/// Resolves schemas against one document.
///
/// Parsed pointer targets are cached by `$ref` string for the lifetime of the
/// resolver. Create one resolver per transformation; the cache is not `Sync`
/// and is never shared.
pub struct SchemaResolver<'a> {
    document: Document<'a>,
    cache: RefCell<HashMap<String, Rc<Schema>>>,
}

impl<'a> SchemaResolver<'a> {
    /// Creates a resolver bound to `document`.
    pub fn new(document: Document<'a>) -> Self {
        Self {
            document,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// The document this resolver reads from.
    pub fn document(&self) -> &Document<'a> {
        &self.document
    }

    /// Resolves `schema` into a directly inspectable form.
    ///
    /// # Errors
    ///
    /// * `AppError::ReferenceNotFound` if the top-level pointer (or an alias on its chain) is missing.
    /// * `AppError::CircularReference` if the alias chain loops.
    ///
    /// Failures inside `allOf` members are logged and the member is skipped.
    pub fn resolve(&self, schema: &Schema) -> AppResult<Resolved> {
        let mut walk = Walk::default();
        let flat = self.resolve_in(schema, &mut walk)?;
        Ok(Resolved {
            schema: flat.schema,
            trail: walk.trail,
            origins: flat.origins,
        })
    }

    /// Like [`resolve`](Self::resolve), but recovers failures as an empty object schema.
    pub fn resolve_or_opaque(&self, schema: &Schema) -> Schema {
        match self.resolve(schema) {
            Ok(resolved) => resolved.schema,
            Err(err) => {
                log::warn!("{}; treating schema as an opaque object", err);
                Schema::empty_object()
            }
        }
    }

    fn resolve_in(&self, schema: &Schema, walk: &mut Walk) -> AppResult<Flat> {
        match &schema.node {
            SchemaNode::Reference(pointer) => {
                if walk.chain.contains(pointer) {
                    return Err(AppError::CircularReference {
                        pointer: pointer.clone(),
                    });
                }
                let target = self.lookup_schema(pointer)?;
                walk.chain.push(pointer.clone());
                walk.trail.push(pointer.clone());
                let resolved = self.resolve_in(&target, walk);
                walk.chain.pop();
                Ok(resolved?.annotate(schema))
            }
            SchemaNode::Composite(composite) => match composite.kind {
                CompositeKind::AllOf => {
                    Ok(self.merge_all_of(&composite.members, walk).annotate(schema))
                }
                CompositeKind::OneOf | CompositeKind::AnyOf => {
                    let resolved = match composite.members.first() {
                        Some(first) => self.resolve_in(first, walk)?,
                        None => Flat::plain(Schema::empty_object()),
                    };
                    Ok(resolved.annotate(schema))
                }
            },
            _ => Ok(Flat::plain(schema.clone())),
        }
    }

    /// Each member is resolved with its own trail, split off the walk so that
    /// it only guards the properties that member supplied.
    fn merge_all_of(&self, members: &[Schema], walk: &mut Walk) -> Flat {
        let mut resolved_members = Vec::with_capacity(members.len());
        for member in members {
            let start = walk.trail.len();
            match self.resolve_in(member, walk) {
                Ok(resolved) => resolved_members.push((resolved, walk.trail.split_off(start))),
                Err(err) => {
                    walk.trail.truncate(start);
                    log::warn!("{}; skipping allOf member", err);
                }
            }
        }

        if !resolved_members
            .iter()
            .any(|(m, _)| m.schema.as_object().is_some())
        {
            return match resolved_members.into_iter().next() {
                Some((first, trail)) => {
                    walk.trail.extend(trail);
                    first
                }
                None => Flat::plain(Schema::empty_object()),
            };
        }

        let mut merged = ObjectSchema::default();
        let mut origins = Origins::new();
        let mut description = None;
        for (member, member_trail) in resolved_members {
            if description.is_none() {
                description = member.schema.description.clone();
            }
            let mut nested = member.origins;
            if let SchemaNode::Object(obj) = member.schema.node {
                for (name, prop) in obj.properties {
                    let mut origin = member_trail.clone();
                    origin.extend(nested.swap_remove(&name).unwrap_or_default());
                    origins.insert(name.clone(), origin);
                    merged.properties.insert(name, prop);
                }
                for name in obj.required {
                    if !merged.required.contains(&name) {
                        merged.required.push(name);
                    }
                }
            }
        }

        let mut schema = Schema::new(SchemaNode::Object(merged));
        schema.description = description;
        Flat { schema, origins }
    }

    fn lookup_schema(&self, pointer: &str) -> AppResult<Rc<Schema>> {
        if let Some(hit) = self.cache.borrow().get(pointer) {
            return Ok(Rc::clone(hit));
        }
        let raw = self.document.lookup(pointer)?;
        let parsed = Rc::new(Schema::from_value(raw));
        self.cache
            .borrow_mut()
            .insert(pointer.to_string(), Rc::clone(&parsed));
        Ok(parsed)
    }
}

/// Annotations written next to a `$ref` or composition keyword override the target's.
fn annotate(mut resolved: Schema, origin: &Schema) -> Schema {
    if origin.example.is_some() {
        resolved.example = origin.example.clone();
    }
    if origin.description.is_some() {
        resolved.description = origin.description.clone();
    }
    resolved
}
